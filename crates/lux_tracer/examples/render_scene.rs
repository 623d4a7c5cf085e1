//! Render one of the demo scenes to a PNG.
//!
//! Usage: `cargo run --example render_scene -- [implicit|dof|mirrors] [output.png]`
//!
//! Set `RUST_LOG=debug` to see scene construction.

use anyhow::{bail, Context, Result};
use lux_tracer::{
    render, shear, Camera, Color, DofCamera, Finish, ImplicitSurface, Mat4, Material, Plane,
    PlaneUv, PointLight, RayGenerator, RenderConfig, Sphere, Transformed, Vec3, World,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::PI;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let scene = args.next().unwrap_or_else(|| "implicit".to_string());
    let output = args.next().unwrap_or_else(|| format!("{scene}.png"));

    let (camera, world, config) = match scene.as_str() {
        "implicit" => implicit_showcase()?,
        "dof" => depth_of_field()?,
        "mirrors" => mirror_pair()?,
        other => bail!("unknown scene '{other}', expected 'implicit', 'dof' or 'mirrors'"),
    };

    let start = std::time::Instant::now();
    let mut rng = StdRng::seed_from_u64(0);
    let image = render(camera.as_ref(), &world, &config, &mut rng);
    log::info!("Rendered {} in {:?}", scene, start.elapsed());

    let buffer = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
        .context("image buffer size mismatch")?;
    buffer
        .save(&output)
        .with_context(|| format!("failed to save {output}"))?;
    println!("Saved to {}", output);

    Ok(())
}

type Scene = (Box<dyn RayGenerator>, World, RenderConfig);

fn open_sky(max_depth: u32) -> RenderConfig {
    RenderConfig {
        background: Color::new(0.7, 0.8, 1.0),
        ambient: Color::splat(0.08),
        max_depth,
    }
}

fn checker_ground(world: &mut World, height: f64, forward: Vec3, ambient: f64) -> Result<()> {
    let checker = world.add_material(
        Material::checker(1.0, Color::splat(0.9), Color::splat(0.2))
            .with_finish(Finish::phong(ambient, 0.8, 0.0, 1.0)),
    );
    world.add(
        PlaneUv::new(Vec3::new(0.0, 0.0, height), Vec3::Z, forward)?,
        checker,
    )?;
    Ok(())
}

/// Glossy material with a white highlight.
fn glossy(color: Color, ambient: f64, specular: f64, shininess: f64) -> Material {
    Material::solid(color).with_finish(Finish::phong(ambient, 0.7, specular, shininess))
}

/// Two Mitchell and two heart surfaces under rotation, shear and scale.
fn implicit_showcase() -> Result<Scene> {
    let camera = Camera::new(
        Vec3::new(0.0, -12.0, 3.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::Z,
        60.0,
        600,
        400,
    )?;

    let mut world = World::new();
    world.add_light(PointLight::new(Vec3::new(0.0, 14.0, 14.0), Color::ONE, 2.0));
    world.add_light(PointLight::new(
        Vec3::new(-6.0, -3.0, 7.0),
        Color::new(0.7, 0.8, 1.0),
        0.7,
    ));
    checker_ground(&mut world, -1.5, Vec3::new(1.0, 1.0, 0.0), 0.6)?;

    let orange = world.add_material(glossy(Color::new(0.9, 0.6, 0.2), 0.25, 0.4, 64.0));
    let pink = world.add_material(glossy(Color::new(0.85, 0.3, 0.4), 0.25, 0.4, 64.0));

    let base_scale = Mat4::from_scale(Vec3::splat(0.8));
    let stretch = Mat4::from_scale(Vec3::new(1.2, 0.8, 1.1));

    let mitchells = [
        (Vec3::new(-3.0, 0.0, 0.8), Mat4::from_rotation_y(PI / 8.0), Mat4::IDENTITY),
        (
            Vec3::new(-1.2, 0.0, 0.8),
            Mat4::from_rotation_z(PI / 10.0),
            shear(0.3, 0.0, 0.0, 0.0, 0.0, 0.0),
        ),
    ];
    for (position, rotation, extra) in mitchells {
        let matrix = Mat4::from_translation(position) * rotation * extra * base_scale;
        let surface = Transformed::new(Box::new(ImplicitSurface::mitchell()), matrix)?;
        world.add(surface, orange)?;
    }

    let hearts = [
        (Vec3::new(1.2, 0.0, 0.8), Mat4::from_rotation_y(-PI / 10.0), stretch),
        (
            Vec3::new(3.0, 0.0, 0.8),
            Mat4::from_rotation_z(-PI / 12.0),
            shear(0.0, 0.25, 0.0, 0.0, 0.0, 0.0) * stretch,
        ),
    ];
    for (position, rotation, extra) in hearts {
        let matrix = Mat4::from_translation(position) * rotation * extra * base_scale;
        let surface = Transformed::new(Box::new(ImplicitSurface::heart()), matrix)?;
        world.add(surface, pink)?;
    }

    Ok((Box::new(camera), world, open_sky(6)))
}

/// Four balls at increasing depth seen through a thin lens focused on the
/// middle of the row.
fn depth_of_field() -> Result<Scene> {
    let pinhole = Camera::new(
        Vec3::new(0.0, -10.0, 2.5),
        Vec3::new(0.0, 0.0, 1.5),
        Vec3::Z,
        45.0,
        800,
        600,
    )?;
    let camera = DofCamera::new(pinhole, 10.0, 1.0, 8)?;

    let mut world = World::new();
    world.add_light(PointLight::new(Vec3::new(3.0, -2.0, 5.0), Color::ONE, 2.0));
    world.add_light(PointLight::new(
        Vec3::new(-4.0, 3.0, 4.0),
        Color::new(0.7, 0.8, 1.0),
        0.8,
    ));

    let balls = [
        (Vec3::new(-2.0, -2.0, 1.0), Color::new(0.9, 0.2, 0.2)),
        (Vec3::new(0.0, 0.0, 1.0), Color::new(0.2, 0.9, 0.2)),
        (Vec3::new(2.0, 2.0, 1.0), Color::new(0.2, 0.2, 0.9)),
        (Vec3::new(0.0, 4.0, 1.0), Color::new(0.9, 0.8, 0.2)),
    ];
    for (center, color) in balls {
        let material = world.add_material(glossy(color, 0.1, 0.3, 64.0));
        world.add(Sphere::new(center, 0.7)?, material)?;
    }
    checker_ground(&mut world, 0.0, Vec3::new(1.0, 1.0, 0.0), 0.6)?;

    Ok((Box::new(camera), world, open_sky(3)))
}

/// A red ball between two tinted facing mirrors.
fn mirror_pair() -> Result<Scene> {
    let camera = Camera::new(
        Vec3::new(-1.5, -1.0, 2.0),
        Vec3::new(-1.0, 1.0, 1.0),
        Vec3::Z,
        60.0,
        800,
        600,
    )?;

    let mut world = World::new();
    world.add_light(PointLight::new(Vec3::new(0.0, 0.5, 3.0), Color::ONE, 2.5));

    let mirror = world.add_material(Material::Mirror {
        reflectance: 1.0,
        decay_per_bounce: 0.75,
        tint: Color::new(0.7, 0.85, 1.0),
        tint_strength: 0.45,
    });
    world.add(Plane::new(Vec3::new(0.0, -1.1, 0.0), Vec3::Y)?, mirror)?;
    world.add(Plane::new(Vec3::new(0.0, 1.1, 0.0), -Vec3::Y)?, mirror)?;

    checker_ground(&mut world, 0.0, Vec3::X, 0.2)?;
    let red = world.add_material(glossy(Color::new(0.8, 0.2, 0.2), 0.1, 0.4, 64.0));
    world.add(Sphere::new(Vec3::new(0.6, 0.2, 0.6), 0.6)?, red)?;

    let config = RenderConfig {
        background: Color::new(0.05, 0.06, 0.08),
        ambient: Color::splat(0.05),
        max_depth: 3,
    };
    Ok((Box::new(camera), world, config))
}
