use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use genesis::JoyPort;
use heapless::FnvIndexMap;
use log::{debug, error, info, warn};

use crate::console::{Console, ConsoleError, SoftJoypad, SoftVdp};
use crate::emulator::PlayState::{Paused, Playing};
use crate::inputs::InputCommand::{Controller1, Controller2, PlayPause, Reset};
use crate::inputs::KeyState::JustReleased;
use crate::inputs::{ControllerButton, InputCommand, KeyState};
use crate::renderer::FrameBuffer;

/// NTSC field rate.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Longest gap we'll try to catch up on; anything past it counts as one frame.
const MAX_CATCH_UP_MS: f64 = 33.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PlayState {
    Paused,
    Playing,
}

pub trait TimeDaemon {
    fn get_now_ms(&self) -> f64;
}

/// Something that can be booted on the console, again and again.
pub type Program = Arc<dyn Fn(SoftVdp, SoftJoypad) + Send + Sync>;

/// Wrap a `genesis` program entry point so it can be booted on the console.
pub fn program<F>(entry: F) -> Program
where
    F: Fn(SoftVdp, SoftJoypad) + Send + Sync + 'static,
{
    Arc::new(entry)
}

pub struct Emulator<Clock: TimeDaemon> {
    pub console: Console,
    pub program: Program,

    pub play_state: PlayState,
    pub last_emu_tick: f64,
    /// Time owed to the console that didn't add up to a whole frame yet.
    pub frame_debt_ms: f64,

    pub input_state: FnvIndexMap<InputCommand, KeyState, 32>,

    pub clock: Clock,
}

impl<Clock: TimeDaemon> Debug for Emulator<Clock> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("Emulator")
            .field("play_state", &self.play_state)
            .field("frame", &self.console.frame_count())
            .field("last_emu_tick", &self.last_emu_tick)
            .field("frame_debt_ms", &self.frame_debt_ms)
            .finish_non_exhaustive()
    }
}

impl<Clock: TimeDaemon> Emulator<Clock> {
    pub fn init(clock: Clock, program: Program) -> Result<Self, ConsoleError> {
        let console = Self::boot(&program)?;
        let last_emu_tick = clock.get_now_ms();

        Ok(Emulator {
            console,
            program,
            play_state: Playing,
            last_emu_tick,
            frame_debt_ms: 0.0,
            input_state: Default::default(),
            clock,
        })
    }

    fn boot(program: &Program) -> Result<Console, ConsoleError> {
        let program = program.clone();
        Console::power_on(move |vdp, joy| program(vdp, joy))
    }

    /// Power cycle: a fresh console running a fresh copy of the program.
    pub fn reset(&mut self) -> Result<(), ConsoleError> {
        warn!("resetting console");
        let mut console = Self::boot(&self.program)?;

        // buttons still held on the host stay held on the new console
        for port in JoyPort::ALL {
            console.set_buttons(port, self.console.buttons(port));
        }
        self.console = console;
        self.frame_debt_ms = 0.0;
        self.last_emu_tick = self.clock.get_now_ms();
        Ok(())
    }

    /// Handle pending input, then run however many frames the wall clock says are due.
    pub fn process_frames(&mut self) -> Result<u32, ConsoleError> {
        self.process_inputs()?;

        let now_ms = self.clock.get_now_ms();
        let mut elapsed_ms = now_ms - self.last_emu_tick;
        self.last_emu_tick = now_ms;

        if self.play_state != Playing {
            return Ok(0);
        }

        if elapsed_ms > MAX_CATCH_UP_MS {
            warn!("{:.1}ms since the last frame, skipping ahead", elapsed_ms);
            elapsed_ms = FRAME_MS;
        }

        self.frame_debt_ms += elapsed_ms;

        let mut frames = 0;
        while self.frame_debt_ms >= FRAME_MS {
            self.frame_debt_ms -= FRAME_MS;
            self.console.step_frame()?;
            frames += 1;
        }

        if frames > 1 {
            debug!("ran {} frames to catch up", frames);
        }
        Ok(frames)
    }

    pub fn render(&self, fb: &mut FrameBuffer) {
        self.console.render(fb);
    }

    pub fn set_input_state(&mut self, input_command: InputCommand, state: KeyState) {
        if self.input_state.insert(input_command, state).is_err() {
            error!("input map full, dropping {:?}", input_command);
        }
    }

    fn process_inputs(&mut self) -> Result<(), ConsoleError> {
        let keys: Vec<_> = self.input_state.keys().copied().collect();

        for key in &keys {
            let state = self.input_state[key];
            match key {
                Controller1(button) => self.set_gamepad_input(JoyPort::Joy1, *button, state),
                Controller2(button) => self.set_gamepad_input(JoyPort::Joy2, *button, state),
                PlayPause => {
                    if state == JustReleased {
                        self.play_state = match self.play_state {
                            Paused => Playing,
                            Playing => Paused,
                        };
                        info!("{:?}", self.play_state);
                        // don't bill the paused time as frames
                        self.last_emu_tick = self.clock.get_now_ms();
                    }
                }
                Reset => {
                    if state == JustReleased {
                        self.reset()?;
                    }
                }
            }
            self.set_input_state(*key, state.update());
        }
        Ok(())
    }

    fn set_gamepad_input(&mut self, port: JoyPort, button: ControllerButton, state: KeyState) {
        if state.is_pressed() {
            self.console.press(port, button.buttons());
        } else {
            self.console.release(port, button.buttons());
        }
    }
}
