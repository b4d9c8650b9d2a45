use core::mem;
use glfw30::{context, Error};

pub const GL_COLOR_BUFFER_BIT: u32 = 0x4000;

pub struct Gl {
    clear: Option<extern "system" fn(u32)>,
    clear_color: Option<extern "system" fn(f32, f32, f32, f32)>,
}

impl Gl {
    /// Loads entry points for the context current on the calling thread.
    pub fn init() -> Result<Gl, Error> {
        unsafe {
            Ok(Gl {
                clear: mem::transmute(context::get_proc_address("glClear")?),
                clear_color: mem::transmute(context::get_proc_address("glClearColor")?),
            })
        }
    }

    pub fn clear(&self, mask: u32) {
        self.clear.expect("glClear")(mask);
    }

    pub fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.clear_color.expect("glClearColor")(red, green, blue, alpha);
    }
}
