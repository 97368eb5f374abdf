use alloc::boxed::Box;
use alloc::sync::Arc;
use core::slice;

use genesis::{JoyEvent, JoyHandler, JoyPort, Joypad, PalSlot, TileAttr, TransferMethod, Vdp};
use log::{debug, info, trace};

use crate::assets::{
    BG_PLANE, CURSOR_PLANE, PALETTE_BASIC, TILE_CURSOR, TILE_FILL, VRAM_POS_TILE_CURSOR,
    VRAM_POS_TILE_FILL,
};
use crate::cursor::{Bounds, Cursor, Step};
use crate::direction::Direction;
use crate::mailbox::MoveMailbox;

/// What a single frame did with the pending move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Nothing was pending.
    Idle,
    Moved { from: Cursor, to: Cursor },
    /// A move was pending but would have left the bounds.
    Blocked { at: Cursor, dir: Direction },
}

/// Program state. The cursor belongs to the frame loop; the mailbox is shared
/// with the gamepad handler built by [`CursorDemo::listener`].
pub struct CursorDemo {
    cursor: Cursor,
    bounds: Bounds,
    mailbox: Arc<MoveMailbox>,
    frames: u32,
}

impl CursorDemo {
    pub fn new(mailbox: Arc<MoveMailbox>) -> Self {
        Self {
            cursor: Cursor::START,
            bounds: Bounds::SCREEN,
            mailbox,
            frames: 0,
        }
    }

    /// Bring up the video chip and gamepads, load graphics and draw the
    /// first screen.
    pub fn boot<V: Vdp, J: Joypad>(vdp: &mut V, joy: &mut J) -> Self {
        let demo = CursorDemo::new(Arc::new(MoveMailbox::new()));

        vdp.init();

        joy.init();
        joy.set_event_handler(demo.listener());

        // one tile per transfer, no DMA, so VRAM is complete before we go on
        vdp.load_tile_data(slice::from_ref(&TILE_FILL), VRAM_POS_TILE_FILL, TransferMethod::Cpu);
        vdp.load_tile_data(slice::from_ref(&TILE_CURSOR), VRAM_POS_TILE_CURSOR, TransferMethod::Cpu);

        vdp.set_palette(PalSlot::Pal0, &PALETTE_BASIC);

        for (x, y) in demo.bounds.cells() {
            vdp.set_tile_map_xy(BG_PLANE, TileAttr::tile(VRAM_POS_TILE_FILL), x, y);
        }

        demo.draw_cursor(vdp);

        info!("cursor demo booted, cursor at ({}, {})", demo.cursor.x, demo.cursor.y);
        demo
    }

    /// The gamepad handler to register with the platform.
    pub fn listener(&self) -> JoyHandler {
        let mailbox = self.mailbox.clone();
        Box::new(move |event| handle_joy_event(&mailbox, event))
    }

    /// One pass of the frame loop, run right after the vblank wait.
    pub fn frame<V: Vdp>(&mut self, vdp: &mut V) -> FrameOutcome {
        self.frames = self.frames.wrapping_add(1);

        let Some(dir) = self.mailbox.take() else {
            return FrameOutcome::Idle;
        };

        vdp.set_tile_map_xy(CURSOR_PLANE, TileAttr::EMPTY, self.cursor.x, self.cursor.y);

        let outcome = match self.cursor.step(dir, &self.bounds) {
            Step::Moved(next) => {
                debug!("frame {}: cursor {:?} ({}, {}) -> ({}, {})", self.frames, dir, self.cursor.x, self.cursor.y, next.x, next.y);
                let from = self.cursor;
                self.cursor = next;
                FrameOutcome::Moved { from, to: next }
            }
            Step::Blocked => {
                trace!("frame {}: cursor at ({}, {}) can't go {:?}", self.frames, self.cursor.x, self.cursor.y, dir);
                FrameOutcome::Blocked { at: self.cursor, dir }
            }
        };

        self.draw_cursor(vdp);
        outcome
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn mailbox(&self) -> &Arc<MoveMailbox> {
        &self.mailbox
    }

    /// Frames processed since boot.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    fn draw_cursor<V: Vdp>(&self, vdp: &mut V) {
        vdp.set_tile_map_xy(CURSOR_PLANE, TileAttr::tile(VRAM_POS_TILE_CURSOR), self.cursor.x, self.cursor.y);
    }
}

/// Gamepad handler body: record the direction held on pad 1, if any.
pub fn handle_joy_event(mailbox: &MoveMailbox, event: JoyEvent) {
    if event.port != JoyPort::Joy1 {
        trace!("ignoring input from {:?}", event.port);
        return;
    }

    if let Some(dir) = Direction::from_buttons(event.state) {
        if let Some(dropped) = mailbox.post(dir) {
            trace!("{:?} replaced pending {:?}", dir, dropped);
        }
    }
}

/// The whole program. Never returns.
pub fn run<V: Vdp, J: Joypad>(mut vdp: V, mut joy: J) -> ! {
    let mut demo = CursorDemo::boot(&mut vdp, &mut joy);

    loop {
        // wait for the frame to finish drawing so plane updates land between frames
        vdp.wait_vsync();

        demo.frame(&mut vdp);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use genesis::{Buttons, Palette, Plane, Tile, PLANE_HEIGHT, PLANE_WIDTH};

    use super::*;

    const CELLS: usize = (PLANE_WIDTH as usize) * (PLANE_HEIGHT as usize);

    #[derive(Debug, PartialEq)]
    enum Call {
        Init,
        LoadTiles { index: u16, count: usize, method: TransferMethod },
        Palette(PalSlot),
        Cell(Plane, TileAttr, u16, u16),
        VSync,
    }

    struct RecordingVdp {
        calls: Vec<Call>,
        planes: [[TileAttr; CELLS]; 2],
        tiles: Vec<(u16, Tile)>,
        palettes: [Palette; 4],
    }

    impl RecordingVdp {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                planes: [[TileAttr(0xFFFF); CELLS]; 2],
                tiles: Vec::new(),
                palettes: [Palette::BLACK; 4],
            }
        }

        fn cell(&self, plane: Plane, x: u16, y: u16) -> TileAttr {
            self.planes[plane.index()][y as usize * PLANE_WIDTH as usize + x as usize]
        }

        fn cursor_cells(&self) -> Vec<(u16, u16)> {
            Bounds::SCREEN
                .cells()
                .filter(|&(x, y)| self.cell(Plane::A, x, y).index() == VRAM_POS_TILE_CURSOR)
                .collect()
        }

        fn cell_writes(&self) -> usize {
            self.calls.iter().filter(|c| matches!(c, Call::Cell(..))).count()
        }
    }

    impl Vdp for RecordingVdp {
        fn init(&mut self) {
            self.calls.push(Call::Init);
            self.planes = [[TileAttr::EMPTY; CELLS]; 2];
            self.tiles.clear();
            self.palettes = [Palette::BLACK; 4];
        }

        fn load_tile_data(&mut self, tiles: &[Tile], index: u16, method: TransferMethod) {
            self.calls.push(Call::LoadTiles { index, count: tiles.len(), method });
            for (i, tile) in tiles.iter().enumerate() {
                self.tiles.push((index + i as u16, *tile));
            }
        }

        fn set_palette(&mut self, slot: PalSlot, palette: &Palette) {
            self.calls.push(Call::Palette(slot));
            self.palettes[slot.index()] = *palette;
        }

        fn set_tile_map_xy(&mut self, plane: Plane, attr: TileAttr, x: u16, y: u16) {
            self.calls.push(Call::Cell(plane, attr, x, y));
            self.planes[plane.index()][y as usize * PLANE_WIDTH as usize + x as usize] = attr;
        }

        fn wait_vsync(&mut self) {
            self.calls.push(Call::VSync);
        }
    }

    #[derive(Default)]
    struct RecordingJoypad {
        inits: usize,
        handler: Option<JoyHandler>,
    }

    impl RecordingJoypad {
        fn send(&mut self, port: JoyPort, state: Buttons) {
            let handler = self.handler.as_mut().expect("handler registered at boot");
            handler(JoyEvent { port, changed: state, state });
        }

        fn press(&mut self, state: Buttons) {
            self.send(JoyPort::Joy1, state);
        }
    }

    impl Joypad for RecordingJoypad {
        fn init(&mut self) {
            self.inits += 1;
            self.handler = None;
        }

        fn set_event_handler(&mut self, handler: JoyHandler) {
            self.handler = Some(handler);
        }
    }

    fn booted() -> (CursorDemo, RecordingVdp, RecordingJoypad) {
        let mut vdp = RecordingVdp::new();
        let mut joy = RecordingJoypad::default();
        let demo = CursorDemo::boot(&mut vdp, &mut joy);
        (demo, vdp, joy)
    }

    #[test]
    fn boot_resets_then_loads_each_tile_separately() {
        let (_, vdp, joy) = booted();

        assert_eq!(vdp.calls[0], Call::Init);
        assert_eq!(joy.inits, 1);
        assert!(joy.handler.is_some());
        assert_eq!(
            vdp.calls[1..4],
            [
                Call::LoadTiles { index: VRAM_POS_TILE_FILL, count: 1, method: TransferMethod::Cpu },
                Call::LoadTiles { index: VRAM_POS_TILE_CURSOR, count: 1, method: TransferMethod::Cpu },
                Call::Palette(PalSlot::Pal0),
            ]
        );
        assert_eq!(vdp.tiles, [(1, TILE_FILL), (2, TILE_CURSOR)]);
        assert_eq!(vdp.palettes[0], PALETTE_BASIC);
    }

    #[test]
    fn boot_fills_plane_b_and_centers_the_cursor() {
        let (demo, vdp, _) = booted();

        for (x, y) in Bounds::SCREEN.cells() {
            assert_eq!(vdp.cell(Plane::B, x, y), TileAttr::tile(VRAM_POS_TILE_FILL), "plane B ({x}, {y})");
        }
        assert_eq!(vdp.cursor_cells(), [(20, 14)]);
        assert_eq!(demo.cursor(), Cursor::START);
        assert_eq!(vdp.cell_writes(), CELLS + 1);
    }

    #[test]
    fn idle_frames_leave_the_planes_alone() {
        let (mut demo, mut vdp, _) = booted();
        let before = vdp.cell_writes();

        for _ in 0..10 {
            assert_eq!(demo.frame(&mut vdp), FrameOutcome::Idle);
        }
        assert_eq!(vdp.cell_writes(), before);
        assert_eq!(demo.frames(), 10);
    }

    #[test]
    fn right_moves_one_cell_and_clears_the_old_one() {
        let (mut demo, mut vdp, mut joy) = booted();

        joy.press(Buttons::RIGHT);
        let outcome = demo.frame(&mut vdp);

        assert_eq!(outcome, FrameOutcome::Moved { from: Cursor { x: 20, y: 14 }, to: Cursor { x: 21, y: 14 } });
        assert_eq!(vdp.cell(Plane::A, 20, 14), TileAttr::EMPTY);
        assert_eq!(vdp.cell(Plane::A, 21, 14), TileAttr::tile(VRAM_POS_TILE_CURSOR));
        assert_eq!(vdp.cursor_cells(), [(21, 14)]);
        assert!(demo.mailbox().is_empty());
    }

    #[test]
    fn down_stops_at_the_last_row() {
        let (mut demo, mut vdp, mut joy) = booted();
        joy.press(Buttons::RIGHT);
        demo.frame(&mut vdp);

        let mut blocked = 0;
        for _ in 0..14 {
            joy.press(Buttons::DOWN);
            if let FrameOutcome::Blocked { .. } = demo.frame(&mut vdp) {
                blocked += 1;
            }
        }

        assert_eq!(demo.cursor(), Cursor { x: 21, y: 27 });
        assert_eq!(blocked, 1);
        assert_eq!(vdp.cursor_cells(), [(21, 27)]);
    }

    #[test]
    fn left_at_column_zero_stays_put() {
        let (mut demo, mut vdp, mut joy) = booted();
        for _ in 0..20 {
            joy.press(Buttons::LEFT);
            demo.frame(&mut vdp);
        }
        assert_eq!(demo.cursor(), Cursor { x: 0, y: 14 });

        joy.press(Buttons::LEFT);
        assert_eq!(
            demo.frame(&mut vdp),
            FrameOutcome::Blocked { at: Cursor { x: 0, y: 14 }, dir: Direction::Left }
        );
        assert_eq!(demo.cursor(), Cursor { x: 0, y: 14 });
        assert_eq!(vdp.cursor_cells(), [(0, 14)]);
    }

    #[test]
    fn second_event_before_a_frame_wins() {
        let (mut demo, mut vdp, mut joy) = booted();

        joy.press(Buttons::LEFT);
        joy.press(Buttons::UP);
        demo.frame(&mut vdp);

        assert_eq!(demo.cursor(), Cursor { x: 20, y: 13 });
        assert_eq!(demo.frame(&mut vdp), FrameOutcome::Idle);
    }

    #[test]
    fn left_and_up_together_go_left() {
        let (mut demo, mut vdp, mut joy) = booted();
        joy.press(Buttons::LEFT | Buttons::UP);
        demo.frame(&mut vdp);
        assert_eq!(demo.cursor(), Cursor { x: 19, y: 14 });
    }

    #[test]
    fn second_pad_and_releases_are_ignored() {
        let (mut demo, mut vdp, mut joy) = booted();

        joy.send(JoyPort::Joy2, Buttons::RIGHT);
        assert!(demo.mailbox().is_empty());

        joy.press(Buttons::DOWN);
        // release: state no longer holds a direction, pending move survives
        joy.handler.as_mut().unwrap()(JoyEvent { port: JoyPort::Joy1, changed: Buttons::DOWN, state: Buttons::empty() });
        joy.press(Buttons::A);
        assert_eq!(demo.mailbox().peek(), Some(Direction::Down));

        demo.frame(&mut vdp);
        assert_eq!(demo.cursor(), Cursor { x: 20, y: 15 });
    }

    #[test]
    fn exactly_one_cursor_cell_every_frame() {
        let (mut demo, mut vdp, mut joy) = booted();
        let presses = [Buttons::UP, Buttons::LEFT, Buttons::DOWN, Buttons::RIGHT, Buttons::empty()];

        for i in 0..400usize {
            let state = presses[(i * 3 + i / 7) % presses.len()];
            if !state.is_empty() {
                joy.press(state);
            }
            demo.frame(&mut vdp);

            let cursor = demo.cursor();
            assert!(demo.bounds().contains(cursor.x as i32, cursor.y as i32));
            assert_eq!(vdp.cursor_cells(), [(cursor.x, cursor.y)], "frame {i}");
        }
    }
}
