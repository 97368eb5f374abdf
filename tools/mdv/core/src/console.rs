//! The emulated console.
//!
//! A program written against the `genesis` traits runs on its own thread
//! (the "68k"), holding a [`SoftVdp`] and a [`SoftJoypad`]. The host side
//! keeps the [`Console`] and advances it one frame at a time:
//!
//! 1. pad changes since the last frame are delivered to the registered
//!    handler, on the host thread, while the program is parked in
//!    `wait_vsync`;
//! 2. one vblank is released to the program;
//! 3. the host waits until the program is back in `wait_vsync`.
//!
//! So the program and its gamepad handler never run at the same time, the
//! same guarantee the real vertical interrupt gives.
//!
//! Dropping the console powers it off: the program thread unwinds out of its
//! next `wait_vsync` and is joined.

use std::panic;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, Receiver, RecvTimeoutError, Sender};
use genesis::{Buttons, JoyEvent, JoyHandler, JoyPort, Joypad, PalSlot, Palette, Plane, Tile, TileAttr, TransferMethod, Vdp};
use log::{debug, error, info, warn};
use parking_lot::Mutex;

use crate::renderer::{render, FrameBuffer};
use crate::vram::Vram;

/// How long a frame may take before the program is considered stuck.
pub const DEFAULT_FRAME_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("program did not return to wait_vsync within {0:?}")]
    Stalled(Duration),
    #[error("program thread has stopped")]
    Halted,
    #[error("couldn't start the program thread: {0}")]
    Spawn(#[from] std::io::Error),
}

#[derive(Default)]
struct JoyState {
    handler: Option<JoyHandler>,
    /// Last state delivered to the handler, per port.
    reported: [Buttons; 2],
}

struct Shared {
    vram: Mutex<Vram>,
    joy: Mutex<JoyState>,
}

/// Unwind payload that ends the program thread at power off.
struct PowerOff;

fn power_off() -> ! {
    debug!("console powered off, stopping program thread");
    panic::resume_unwind(Box::new(PowerOff))
}

/// The program's view of the video hardware.
pub struct SoftVdp {
    shared: Arc<Shared>,
    vblank: Receiver<()>,
    ready: Sender<()>,
    power: Receiver<()>,
}

impl Vdp for SoftVdp {
    fn init(&mut self) {
        self.shared.vram.lock().reset();
        debug!("vdp reset");
    }

    fn load_tile_data(&mut self, tiles: &[Tile], index: u16, method: TransferMethod) {
        self.shared.vram.lock().write_tiles(tiles, index, method);
    }

    fn set_palette(&mut self, slot: PalSlot, palette: &Palette) {
        self.shared.vram.lock().write_palette(slot, palette);
    }

    fn set_tile_map_xy(&mut self, plane: Plane, attr: TileAttr, x: u16, y: u16) {
        self.shared.vram.lock().set_cell(plane, attr, x, y);
    }

    fn wait_vsync(&mut self) {
        select! {
            send(self.ready, ()) -> sent => {
                if sent.is_err() {
                    power_off()
                }
            }
            recv(self.power) -> _ => power_off(),
        }
        select! {
            recv(self.vblank) -> vblank => {
                if vblank.is_err() {
                    power_off()
                }
            }
            recv(self.power) -> _ => power_off(),
        }
    }
}

/// The program's view of the gamepad ports.
pub struct SoftJoypad {
    shared: Arc<Shared>,
}

impl Joypad for SoftJoypad {
    fn init(&mut self) {
        let mut joy = self.shared.joy.lock();
        joy.handler = None;
        joy.reported = [Buttons::empty(); 2];
    }

    fn set_event_handler(&mut self, handler: JoyHandler) {
        self.shared.joy.lock().handler = Some(handler);
    }
}

pub struct Console {
    shared: Arc<Shared>,
    vblank: Sender<()>,
    ready: Receiver<()>,
    power: Sender<()>,
    thread: Option<JoinHandle<()>>,
    /// The program missed a vblank and still owes us its `ready`.
    stalled: bool,

    /// Buttons currently held, as the host sees them.
    pads: [Buttons; 2],
    frame: u64,
    timeout: Duration,
}

impl Console {
    /// Start `program` and wait for it to finish booting (its first `wait_vsync`).
    pub fn power_on<F>(program: F) -> Result<Self, ConsoleError>
    where
        F: FnOnce(SoftVdp, SoftJoypad) + Send + 'static,
    {
        Self::power_on_with_timeout(program, DEFAULT_FRAME_TIMEOUT)
    }

    pub fn power_on_with_timeout<F>(program: F, timeout: Duration) -> Result<Self, ConsoleError>
    where
        F: FnOnce(SoftVdp, SoftJoypad) + Send + 'static,
    {
        let shared = Arc::new(Shared {
            vram: Mutex::new(Vram::new()),
            joy: Mutex::new(JoyState::default()),
        });

        let (vblank_tx, vblank_rx) = bounded(1);
        let (ready_tx, ready_rx) = bounded(1);
        let (power_tx, power_rx) = bounded(1);

        let vdp = SoftVdp {
            shared: shared.clone(),
            vblank: vblank_rx,
            ready: ready_tx,
            power: power_rx,
        };
        let joy = SoftJoypad { shared: shared.clone() };

        let thread = thread::Builder::new()
            .name("m68k".into())
            .spawn(move || program(vdp, joy))?;

        let mut console = Self {
            shared,
            vblank: vblank_tx,
            ready: ready_rx,
            power: power_tx,
            thread: Some(thread),
            stalled: false,
            pads: [Buttons::empty(); 2],
            frame: 0,
            timeout,
        };

        console.await_ready()?;
        info!("console powered on");
        Ok(console)
    }

    /// Replace the held buttons on `port`. Seen by the program at the next frame.
    pub fn set_buttons(&mut self, port: JoyPort, state: Buttons) {
        self.pads[port.index()] = state;
    }

    pub fn press(&mut self, port: JoyPort, buttons: Buttons) {
        self.pads[port.index()].insert(buttons);
    }

    pub fn release(&mut self, port: JoyPort, buttons: Buttons) {
        self.pads[port.index()].remove(buttons);
    }

    pub fn buttons(&self, port: JoyPort) -> Buttons {
        self.pads[port.index()]
    }

    /// Run one frame. Returns the number of frames completed since power on.
    ///
    /// After a [`ConsoleError::Stalled`], the next call first waits for the
    /// late program to get back to `wait_vsync` and only then runs the frame.
    pub fn step_frame(&mut self) -> Result<u64, ConsoleError> {
        if self.stalled {
            self.await_ready()?;
            info!("program caught up after a stall");
        }

        self.dispatch_joy_events();

        self.vblank.send(()).map_err(|_| {
            error!("program thread is gone");
            ConsoleError::Halted
        })?;
        self.await_ready()?;

        self.frame += 1;
        Ok(self.frame)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Inspect video memory. Only call between frames.
    pub fn with_vram<R>(&self, f: impl FnOnce(&Vram) -> R) -> R {
        f(&self.shared.vram.lock())
    }

    pub fn render(&self, fb: &mut FrameBuffer) {
        render(&self.shared.vram.lock(), fb);
    }

    fn dispatch_joy_events(&mut self) {
        let mut joy = self.shared.joy.lock();
        let JoyState { handler, reported } = &mut *joy;

        for port in JoyPort::ALL {
            let state = self.pads[port.index()];
            let changed = state ^ reported[port.index()];
            if changed.is_empty() {
                continue;
            }
            reported[port.index()] = state;

            let event = JoyEvent { port, changed, state };
            debug!("{:?}: down {:?}, up {:?}", port, event.pressed(), event.released());
            match handler {
                Some(handler) => handler(event),
                None => debug!("{:?} changed to {:?} with no handler installed", port, state),
            }
        }
    }

    fn await_ready(&mut self) -> Result<(), ConsoleError> {
        match self.ready.recv_timeout(self.timeout) {
            Ok(()) => {
                self.stalled = false;
                Ok(())
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!("program missed vblank by more than {:?}", self.timeout);
                self.stalled = true;
                Err(ConsoleError::Stalled(self.timeout))
            }
            Err(RecvTimeoutError::Disconnected) => {
                error!("program thread stopped before reaching wait_vsync");
                Err(ConsoleError::Halted)
            }
        }
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        let _ = self.power.try_send(());

        let Some(thread) = self.thread.take() else {
            return;
        };
        if self.stalled && !thread.is_finished() {
            // it stops by itself once it reaches wait_vsync
            warn!("powering off with the program still busy, not waiting for it");
            return;
        }

        match thread.join() {
            Ok(()) => debug!("program returned"),
            Err(payload) if payload.is::<PowerOff>() => info!("console powered off"),
            Err(_) => error!("program thread panicked"),
        }
    }
}
