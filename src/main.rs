// Copyright 2020 TwoCookingMice

use financier::core::scene_loader::load_scene_with_settings;
use financier::integrators::direct::{DirectIntegrator, SamplingStrategy};
use financier::io::write_image;
use financier::renderers::simple::{Renderer, SimpleRenderer};

use std::env;
use std::error::Error;

struct Options {
    input_path: String,
    output_path: String,
    spp: Option<u32>,
    strategy: Option<SamplingStrategy>,
    seed: u64,
    camera_id: usize,
}

fn parse_args(args: &[String]) -> Result<Options, Box<dyn Error>> {
    if args.len() < 3 {
        return Err(format!("Usage: {} <scene.xml> <output.exr|png> [--spp N] [--strategy uniform|cosine|importance] [--seed N] [--camera N]",
                           args.get(0).map(String::as_str).unwrap_or("financier")).into());
    }

    let mut options = Options {
        input_path: args[1].clone(),
        output_path: args[2].clone(),
        spp: None,
        strategy: None,
        seed: 0,
        camera_id: 0,
    };

    let mut i = 3;
    while i < args.len() {
        let flag = args[i].as_str();
        i += 1;
        let value = args.get(i).ok_or_else(|| format!("missing value for {}", flag));
        match flag {
            "--spp" => options.spp = Some(value?.parse::<u32>()?),
            "--strategy" => options.strategy = Some(value?.parse::<SamplingStrategy>()?),
            "--seed" => options.seed = value?.parse::<u64>()?,
            "--camera" => options.camera_id = value?.parse::<usize>()?,
            other if other.starts_with("--") => {
                log::warn!("Ignoring unknown option {}", other);
            }
            other => {
                log::warn!("Ignoring unknown argument {}", other);
                continue;
            }
        }
        i += 1;
    }
    Ok(options)
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let options = parse_args(args)?;

    let load_result = load_scene_with_settings(&options.input_path)?;
    let mut scene = load_result.scene;
    let spp = options.spp.or(load_result.samples_per_pixel).unwrap_or(1);
    let strategy = options.strategy.or(load_result.strategy).unwrap_or_default();
    log::info!("Direct lighting with {} sampling, {} spp, seed {}", strategy, spp, options.seed);

    let integrator = Box::new(DirectIntegrator::new(strategy, spp));
    let renderer = SimpleRenderer::new(integrator, options.camera_id, options.seed);
    renderer.render(&mut scene)?;

    let sensor = scene.camera(options.camera_id)
        .ok_or_else(|| format!("camera {} disappeared after rendering", options.camera_id))?;
    write_image(sensor.bitmap(), &options.output_path)?;
    Ok(())
}

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if let Err(err) = run(&args) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(&args(&["financier", "scene.xml", "out.exr",
                                          "--spp", "16", "--strategy", "cosine",
                                          "--seed", "7", "--camera", "1"])).unwrap();
        assert_eq!(options.input_path, "scene.xml");
        assert_eq!(options.output_path, "out.exr");
        assert_eq!(options.spp, Some(16));
        assert_eq!(options.strategy, Some(SamplingStrategy::CosineWeighted));
        assert_eq!(options.seed, 7);
        assert_eq!(options.camera_id, 1);

        assert!(parse_args(&args(&["financier", "scene.xml"])).is_err());
        assert!(parse_args(&args(&["financier", "scene.xml", "out.png", "--spp"])).is_err());
    }

    #[test]
    fn test_parse_args_skips_unknown_option_value() {
        let options = parse_args(&args(&["financier", "scene.xml", "out.png",
                                          "--foo", "bar", "--spp", "4"])).unwrap();
        assert_eq!(options.spp, Some(4));

        let options = parse_args(&args(&["financier", "scene.xml", "out.png",
                                          "stray", "--seed", "3"])).unwrap();
        assert_eq!(options.seed, 3);
    }
}
