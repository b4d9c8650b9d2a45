use std::sync::atomic::{AtomicBool, Ordering};

use glfw30::{context, get_time, Event, Glfw, WindowEvent};

mod gl;
use gl::{Gl, GL_COLOR_BUFFER_BIT};

fn main() {
    env_logger::init();

    let glfw = Glfw::init().expect("GLFW failed to initialize");

    let window = glfw
        .create_window(&[], 800, 600, "GLFW Window", None, None)
        .expect("Failed to create window");

    let running = AtomicBool::new(true);
    let render_context = window.context().expect("window context");

    std::thread::scope(|scope| {
        let running = &running;
        scope.spawn(move || {
            render_context
                .make_current()
                .expect("glfwMakeContextCurrent");
            let gl = Gl::init().expect("Initialize GL");
            while running.load(Ordering::Acquire) {
                let time = get_time() as f32 * 2.0;
                gl.clear_color(time.sin(), time.cos(), 1.0 - time.sin(), 1.0);
                gl.clear(GL_COLOR_BUFFER_BIT);
                render_context.swap_buffers().expect("glfwSwapBuffers");
            }
            context::detach_current().expect("glfwMakeContextCurrent");
        });

        while running.load(Ordering::Acquire) {
            let result = glfw.wait_events(&mut |_time, event| {
                println!("{:?}", event);
                if let Event::Window(_, WindowEvent::Close) = event {
                    running.store(false, Ordering::Release);
                }
            });
            result.expect("glfwWaitEvents");
        }
    });
}
