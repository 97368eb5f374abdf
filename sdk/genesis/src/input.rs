use alloc::boxed::Box;

bitflags::bitflags! {
    /// Gamepad button state, one bit per button.
    ///
    /// The layout matches what the pad read routine assembles from the two
    /// TH-select phases of a 3-button pad, with the extra 6-button pad
    /// buttons above bit 7.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct Buttons: u16 {
        const UP    = 0x0001;
        const DOWN  = 0x0002;
        const LEFT  = 0x0004;
        const RIGHT = 0x0008;
        const B     = 0x0010;
        const C     = 0x0020;
        const A     = 0x0040;
        const START = 0x0080;
        const Z     = 0x0100;
        const Y     = 0x0200;
        const X     = 0x0400;
        const MODE  = 0x0800;

        const DPAD = Self::UP.bits() | Self::DOWN.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

/// Controller port a gamepad is plugged into.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum JoyPort {
    Joy1,
    Joy2,
}

impl JoyPort {
    pub const ALL: [JoyPort; 2] = [JoyPort::Joy1, JoyPort::Joy2];

    pub const fn index(self) -> usize {
        match self {
            JoyPort::Joy1 => 0,
            JoyPort::Joy2 => 1,
        }
    }
}

/// Pushed to the registered [`JoyHandler`] whenever a pad's state changes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct JoyEvent {
    pub port: JoyPort,
    /// Buttons whose state differs from the previous report.
    pub changed: Buttons,
    /// Everything currently held on this pad.
    pub state: Buttons,
}

impl JoyEvent {
    /// Buttons that went down with this event.
    #[inline]
    pub fn pressed(&self) -> Buttons {
        self.changed & self.state
    }

    /// Buttons that came up with this event.
    #[inline]
    pub fn released(&self) -> Buttons {
        self.changed - self.state
    }
}

/// Callback the platform invokes from its vblank handler, once per change.
pub type JoyHandler = Box<dyn FnMut(JoyEvent) + Send>;

/// The input side of the console.
pub trait Joypad {
    /// Forget any previous handler and treat every pad as released.
    fn init(&mut self);

    /// Replace the event handler. Events are delivered between frames, never
    /// while the program is between two `wait_vsync` calls.
    fn set_event_handler(&mut self, handler: JoyHandler);
}
