use glfw30::{context, Action, Event, Glfw, Key, WindowEvent, WindowHint};

mod gl;
use gl::{Gl, GL_COLOR_BUFFER_BIT};

fn main() {
    env_logger::init();

    let glfw = Glfw::init().expect("GLFW failed to initialize");
    println!("GLFW {}", Glfw::get_version_string());

    if let Some(monitor) = glfw.get_primary_monitor().expect("glfwGetPrimaryMonitor") {
        let name = monitor.get_name().expect("glfwGetMonitorName");
        let mode = monitor.get_video_mode().expect("glfwGetVideoMode");
        println!("primary monitor: {} {}x{}", name, mode.width, mode.height);
    }

    let window = glfw
        .create_window(&[WindowHint::Resizable(true)], 800, 600, "GLFW Window", None, None)
        .expect("Failed to create window");

    window
        .make_context_current()
        .expect("glfwMakeContextCurrent");
    context::swap_interval(1).expect("glfwSwapInterval");

    let gl = Gl::init().expect("Initialize GL");

    let mut running = true;
    while running {
        let result = glfw.wait_events(&mut |_time, event| {
            println!("{:?}", event);
            match event {
                Event::Window(_, WindowEvent::Close)
                | Event::Window(_, WindowEvent::Key(Key::Escape, Action::Press)) => {
                    running = false;
                }
                Event::Window(_, WindowEvent::Refresh) => {
                    gl.clear_color(0.2, 0.2, 0.2, 0.2);
                    gl.clear(GL_COLOR_BUFFER_BIT);
                    window.swap_buffers().expect("glfwSwapBuffers");
                }
                _ => {}
            }
        });
        result.expect("glfwWaitEvents");
    }
}
