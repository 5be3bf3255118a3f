// Copyright @yucwang 2026

use financier::core::integrator::Integrator;
use financier::core::rng::LcgRng;
use financier::core::scene_loader::load_scene_with_settings;
use financier::integrators::direct::{DirectIntegrator, SamplingStrategy};
use financier::math::constants::{Float, Vector2f};
use financier::math::spectrum::RGBSpectrum;

use std::env;
use std::error::Error;

// Renders one pixel `runs` times with distinct seeds and reports the mean and
// sample standard deviation per channel.
fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    if args.len() < 4 {
        return Err(format!("Usage: {} <scene.xml> <x> <y> [--spp N] [--runs N] [--strategy S] [--seed N] [--camera N]",
                           args[0]).into());
    }

    let scene_path = &args[1];
    let x: usize = args[2].parse()?;
    let y: usize = args[3].parse()?;

    let mut spp: Option<u32> = None;
    let mut runs: u32 = 64;
    let mut strategy: Option<SamplingStrategy> = None;
    let mut seed: u64 = 0;
    let mut camera_id: usize = 0;

    let mut i = 4;
    while i + 1 < args.len() {
        let value = &args[i + 1];
        match args[i].as_str() {
            "--spp" => spp = Some(value.parse()?),
            "--runs" => runs = value.parse()?,
            "--strategy" => strategy = Some(value.parse()?),
            "--seed" => seed = value.parse()?,
            "--camera" => camera_id = value.parse()?,
            other => log::warn!("Ignoring unknown argument {}", other),
        }
        i += 2;
    }

    let load_result = load_scene_with_settings(scene_path)?;
    let scene = load_result.scene;
    let spp = spp.or(load_result.samples_per_pixel).unwrap_or(1);
    let strategy = strategy.or(load_result.strategy).unwrap_or_default();
    if spp == 0 || runs < 2 {
        return Err("need spp >= 1 and runs >= 2".into());
    }

    let sensor = scene.camera(camera_id).ok_or_else(|| format!("camera {} not found", camera_id))?;
    let (width, height) = sensor.bitmap().resolution();
    if x >= width || y >= height {
        return Err(format!("pixel ({}, {}) outside {}x{} film", x, y, width, height).into());
    }

    let integrator = DirectIntegrator::new(strategy, spp);
    let pixel = Vector2f::new(x as Float, y as Float);

    let estimates: Vec<RGBSpectrum> = (0..runs as u64)
        .map(|run| {
            let mut rng = LcgRng::new(seed.wrapping_add(run));
            let mut sum = RGBSpectrum::default();
            for _ in 0..spp {
                sum += integrator.trace_ray_forward(&scene, sensor, pixel, &mut rng);
            }
            sum / spp as Float
        })
        .collect();

    let n = estimates.len() as Float;
    let mut mean = RGBSpectrum::default();
    for e in &estimates {
        mean += *e / n;
    }
    let mut var = RGBSpectrum::default();
    for e in &estimates {
        let d = *e - mean;
        var += d * d / (n - 1.0);
    }

    println!("pixel ({}, {}) strategy {} spp {} runs {}", x, y, strategy, spp, runs);
    println!("mean   {:.6} {:.6} {:.6}", mean[0], mean[1], mean[2]);
    println!("stddev {:.6} {:.6} {:.6}", var[0].sqrt(), var[1].sqrt(), var[2].sqrt());
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
