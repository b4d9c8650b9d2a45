use core::mem;

use glfw30_sys as sys;

macro_rules! keys {
    ($($name:ident = $code:ident,)*) => {
        #[repr(i32)]
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        pub enum Key {
            $($name = sys::$code,)*
        }

        impl TryFrom<i32> for Key {
            type Error = i32;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                match value {
                    $(sys::$code => Ok(Key::$name),)*
                    _ => Err(value),
                }
            }
        }
    };
}

keys! {
    Space = GLFW_KEY_SPACE,
    Apostrophe = GLFW_KEY_APOSTROPHE,
    Comma = GLFW_KEY_COMMA,
    Minus = GLFW_KEY_MINUS,
    Period = GLFW_KEY_PERIOD,
    Slash = GLFW_KEY_SLASH,
    Num0 = GLFW_KEY_0,
    Num1 = GLFW_KEY_1,
    Num2 = GLFW_KEY_2,
    Num3 = GLFW_KEY_3,
    Num4 = GLFW_KEY_4,
    Num5 = GLFW_KEY_5,
    Num6 = GLFW_KEY_6,
    Num7 = GLFW_KEY_7,
    Num8 = GLFW_KEY_8,
    Num9 = GLFW_KEY_9,
    Semicolon = GLFW_KEY_SEMICOLON,
    Equal = GLFW_KEY_EQUAL,
    A = GLFW_KEY_A,
    B = GLFW_KEY_B,
    C = GLFW_KEY_C,
    D = GLFW_KEY_D,
    E = GLFW_KEY_E,
    F = GLFW_KEY_F,
    G = GLFW_KEY_G,
    H = GLFW_KEY_H,
    I = GLFW_KEY_I,
    J = GLFW_KEY_J,
    K = GLFW_KEY_K,
    L = GLFW_KEY_L,
    M = GLFW_KEY_M,
    N = GLFW_KEY_N,
    O = GLFW_KEY_O,
    P = GLFW_KEY_P,
    Q = GLFW_KEY_Q,
    R = GLFW_KEY_R,
    S = GLFW_KEY_S,
    T = GLFW_KEY_T,
    U = GLFW_KEY_U,
    V = GLFW_KEY_V,
    W = GLFW_KEY_W,
    X = GLFW_KEY_X,
    Y = GLFW_KEY_Y,
    Z = GLFW_KEY_Z,
    LeftBracket = GLFW_KEY_LEFT_BRACKET,
    Backslash = GLFW_KEY_BACKSLASH,
    RightBracket = GLFW_KEY_RIGHT_BRACKET,
    GraveAccent = GLFW_KEY_GRAVE_ACCENT,
    World1 = GLFW_KEY_WORLD_1,
    World2 = GLFW_KEY_WORLD_2,
    Escape = GLFW_KEY_ESCAPE,
    Enter = GLFW_KEY_ENTER,
    Tab = GLFW_KEY_TAB,
    Backspace = GLFW_KEY_BACKSPACE,
    Insert = GLFW_KEY_INSERT,
    Delete = GLFW_KEY_DELETE,
    Right = GLFW_KEY_RIGHT,
    Left = GLFW_KEY_LEFT,
    Down = GLFW_KEY_DOWN,
    Up = GLFW_KEY_UP,
    PageUp = GLFW_KEY_PAGE_UP,
    PageDown = GLFW_KEY_PAGE_DOWN,
    Home = GLFW_KEY_HOME,
    End = GLFW_KEY_END,
    CapsLock = GLFW_KEY_CAPS_LOCK,
    ScrollLock = GLFW_KEY_SCROLL_LOCK,
    NumLock = GLFW_KEY_NUM_LOCK,
    PrintScreen = GLFW_KEY_PRINT_SCREEN,
    Pause = GLFW_KEY_PAUSE,
    F1 = GLFW_KEY_F1,
    F2 = GLFW_KEY_F2,
    F3 = GLFW_KEY_F3,
    F4 = GLFW_KEY_F4,
    F5 = GLFW_KEY_F5,
    F6 = GLFW_KEY_F6,
    F7 = GLFW_KEY_F7,
    F8 = GLFW_KEY_F8,
    F9 = GLFW_KEY_F9,
    F10 = GLFW_KEY_F10,
    F11 = GLFW_KEY_F11,
    F12 = GLFW_KEY_F12,
    F13 = GLFW_KEY_F13,
    F14 = GLFW_KEY_F14,
    F15 = GLFW_KEY_F15,
    F16 = GLFW_KEY_F16,
    F17 = GLFW_KEY_F17,
    F18 = GLFW_KEY_F18,
    F19 = GLFW_KEY_F19,
    F20 = GLFW_KEY_F20,
    F21 = GLFW_KEY_F21,
    F22 = GLFW_KEY_F22,
    F23 = GLFW_KEY_F23,
    F24 = GLFW_KEY_F24,
    F25 = GLFW_KEY_F25,
    Kp0 = GLFW_KEY_KP_0,
    Kp1 = GLFW_KEY_KP_1,
    Kp2 = GLFW_KEY_KP_2,
    Kp3 = GLFW_KEY_KP_3,
    Kp4 = GLFW_KEY_KP_4,
    Kp5 = GLFW_KEY_KP_5,
    Kp6 = GLFW_KEY_KP_6,
    Kp7 = GLFW_KEY_KP_7,
    Kp8 = GLFW_KEY_KP_8,
    Kp9 = GLFW_KEY_KP_9,
    KpDecimal = GLFW_KEY_KP_DECIMAL,
    KpDivide = GLFW_KEY_KP_DIVIDE,
    KpMultiply = GLFW_KEY_KP_MULTIPLY,
    KpSubtract = GLFW_KEY_KP_SUBTRACT,
    KpAdd = GLFW_KEY_KP_ADD,
    KpEnter = GLFW_KEY_KP_ENTER,
    KpEqual = GLFW_KEY_KP_EQUAL,
    LeftShift = GLFW_KEY_LEFT_SHIFT,
    LeftControl = GLFW_KEY_LEFT_CONTROL,
    LeftAlt = GLFW_KEY_LEFT_ALT,
    LeftSuper = GLFW_KEY_LEFT_SUPER,
    RightShift = GLFW_KEY_RIGHT_SHIFT,
    RightControl = GLFW_KEY_RIGHT_CONTROL,
    RightAlt = GLFW_KEY_RIGHT_ALT,
    RightSuper = GLFW_KEY_RIGHT_SUPER,
    Menu = GLFW_KEY_MENU,
    Unknown = GLFW_KEY_UNKNOWN,
}

pub use self::MouseButton::{
    Button1 as MouseButtonLeft, Button2 as MouseButtonRight, Button3 as MouseButtonMiddle,
};

/// Buttons 1 to 3 are left, right and middle.
#[repr(i32)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum MouseButton {
    Button1 = sys::GLFW_MOUSE_BUTTON_1,
    Button2 = sys::GLFW_MOUSE_BUTTON_2,
    Button3 = sys::GLFW_MOUSE_BUTTON_3,
    Button4 = sys::GLFW_MOUSE_BUTTON_4,
    Button5 = sys::GLFW_MOUSE_BUTTON_5,
    Button6 = sys::GLFW_MOUSE_BUTTON_6,
    Button7 = sys::GLFW_MOUSE_BUTTON_7,
    Button8 = sys::GLFW_MOUSE_BUTTON_8,
}

impl TryFrom<i32> for MouseButton {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if value >= sys::GLFW_MOUSE_BUTTON_1 && value <= sys::GLFW_MOUSE_BUTTON_LAST {
            return Ok(unsafe { mem::transmute::<i32, MouseButton>(value) });
        }
        Err(value)
    }
}

#[repr(i32)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Action {
    Release = sys::GLFW_RELEASE,
    Press = sys::GLFW_PRESS,
    Repeat = sys::GLFW_REPEAT,
}

impl TryFrom<i32> for Action {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if value >= sys::GLFW_RELEASE && value <= sys::GLFW_REPEAT {
            return Ok(unsafe { mem::transmute::<i32, Action>(value) });
        }
        Err(value)
    }
}

impl Action {
    /// Joystick buttons are reported as bytes holding `GLFW_PRESS` or `GLFW_RELEASE`.
    pub(crate) fn from_button_state(state: u8) -> Action {
        if i32::from(state) == sys::GLFW_PRESS {
            Action::Press
        } else {
            Action::Release
        }
    }
}

#[repr(i32)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CursorMode {
    /// Visible and behaving normally.
    Normal = sys::GLFW_CURSOR_NORMAL,
    /// Invisible while over the client area of the window.
    Hidden = sys::GLFW_CURSOR_HIDDEN,
    /// Invisible and unable to leave the window, but unconstrained in position.
    Captured = sys::GLFW_CURSOR_CAPTURED,
}

impl TryFrom<i32> for CursorMode {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            sys::GLFW_CURSOR_NORMAL => Ok(CursorMode::Normal),
            sys::GLFW_CURSOR_HIDDEN => Ok(CursorMode::Hidden),
            sys::GLFW_CURSOR_CAPTURED => Ok(CursorMode::Captured),
            _ => Err(value),
        }
    }
}

#[repr(i32)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Joystick {
    Joystick1 = sys::GLFW_JOYSTICK_1,
    Joystick2 = sys::GLFW_JOYSTICK_2,
    Joystick3 = sys::GLFW_JOYSTICK_3,
    Joystick4 = sys::GLFW_JOYSTICK_4,
    Joystick5 = sys::GLFW_JOYSTICK_5,
    Joystick6 = sys::GLFW_JOYSTICK_6,
    Joystick7 = sys::GLFW_JOYSTICK_7,
    Joystick8 = sys::GLFW_JOYSTICK_8,
    Joystick9 = sys::GLFW_JOYSTICK_9,
    Joystick10 = sys::GLFW_JOYSTICK_10,
    Joystick11 = sys::GLFW_JOYSTICK_11,
    Joystick12 = sys::GLFW_JOYSTICK_12,
    Joystick13 = sys::GLFW_JOYSTICK_13,
    Joystick14 = sys::GLFW_JOYSTICK_14,
    Joystick15 = sys::GLFW_JOYSTICK_15,
    Joystick16 = sys::GLFW_JOYSTICK_16,
}

impl Joystick {
    pub fn all() -> impl Iterator<Item = Joystick> {
        (sys::GLFW_JOYSTICK_1..=sys::GLFW_JOYSTICK_LAST).filter_map(|joy| Joystick::try_from(joy).ok())
    }
}

impl TryFrom<i32> for Joystick {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if value >= sys::GLFW_JOYSTICK_1 && value <= sys::GLFW_JOYSTICK_LAST {
            return Ok(unsafe { mem::transmute::<i32, Joystick>(value) });
        }
        Err(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_from_code() {
        assert_eq!(Ok(Key::Space), Key::try_from(32));
        assert_eq!(Ok(Key::A), Key::try_from(sys::GLFW_KEY_A));
        assert_eq!(Ok(Key::World2), Key::try_from(162));
        assert_eq!(Ok(Key::F25), Key::try_from(314));
        assert_eq!(Ok(Key::Menu), Key::try_from(sys::GLFW_KEY_LAST));
        assert_eq!(Ok(Key::Unknown), Key::try_from(sys::GLFW_KEY_UNKNOWN));
        assert_eq!(Err(33), Key::try_from(33));
        assert_eq!(Err(349), Key::try_from(349));
    }

    #[test]
    fn every_key_round_trips_its_code() {
        for code in -1..=sys::GLFW_KEY_LAST {
            if let Ok(key) = Key::try_from(code) {
                assert_eq!(code, key as i32);
            }
        }
    }

    #[test]
    fn mouse_button_aliases() {
        assert_eq!(MouseButton::Button1, MouseButtonLeft);
        assert_eq!(sys::GLFW_MOUSE_BUTTON_RIGHT, MouseButtonRight as i32);
        assert_eq!(sys::GLFW_MOUSE_BUTTON_MIDDLE, MouseButtonMiddle as i32);
        assert_eq!(Ok(MouseButton::Button8), MouseButton::try_from(7));
        assert_eq!(Err(8), MouseButton::try_from(8));
    }

    #[test]
    fn action_from_code() {
        assert_eq!(Ok(Action::Repeat), Action::try_from(sys::GLFW_REPEAT));
        assert_eq!(Err(3), Action::try_from(3));
        assert_eq!(Action::Press, Action::from_button_state(1));
        assert_eq!(Action::Release, Action::from_button_state(0));
    }

    #[test]
    fn cursor_mode_from_code() {
        assert_eq!(Ok(CursorMode::Captured), CursorMode::try_from(sys::GLFW_CURSOR_CAPTURED));
        assert_eq!(Err(0), CursorMode::try_from(0));
    }

    #[test]
    fn all_joysticks() {
        let joysticks: Vec<Joystick> = Joystick::all().collect();
        assert_eq!(16, joysticks.len());
        assert_eq!(Joystick::Joystick1, joysticks[0]);
        assert_eq!(Joystick::Joystick16, joysticks[15]);
    }
}
