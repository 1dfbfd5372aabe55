mod cli;

use clap::Parser;

use cli::{Args, Shape};
use wirecam::prelude::*;
use wirecam::Result;

const TITLE: &str = "Wirecam";

fn load_scene(engine: &mut Engine, args: &Args) -> Result<()> {
    if let Some(path) = &args.obj {
        let mesh = WireframeMesh::from_obj(path)?;
        engine.add_object(SceneObject::new(mesh).with_spin(Vec3::new(0.0, 0.5, 0.0)));
        return Ok(());
    }
    match args.shape {
        Shape::Cube => engine.load_cube_scene(),
        Shape::Sphere => {
            let sphere = WireframeMesh::sphere(args.sphere_points, args.sphere_neighbors);
            log::info!(
                "Sphere with {} points and {} edges",
                sphere.vertex_count(),
                sphere.edge_count()
            );
            engine.add_object(SceneObject::new(sphere).with_spin(Vec3::new(0.0, 1.0, 0.0)));
        }
    }
    Ok(())
}

fn run_window(engine: &mut Engine) -> Result<()> {
    let mut window = Window::new(TITLE, engine.size())?;
    let mut frame_limiter = FrameLimiter::new(&window);

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                let size = ScreenSize::new(w, h);
                window.resize(size)?;
                engine.resize(size);
            }
            WindowEvent::None => {}
        }

        let delta_time = frame_limiter.wait_and_get_delta(&window) as f32 / 1000.0;
        engine.update(&window.input_state(), delta_time);
        engine.render();
        window.present(engine.frame_buffer())?;
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut engine = Engine::new(ScreenSize::new(args.width, args.height));
    engine.set_controller(CameraController::new(args.move_speed, args.turn_speed));
    engine.draw_grid = args.grid;
    load_scene(&mut engine, &args)?;

    if let Some(path) = &args.snapshot {
        engine.update(&InputState::default(), args.snapshot_time);
        engine.render();
        return engine.save_snapshot(path);
    }

    run_window(&mut engine)
}
