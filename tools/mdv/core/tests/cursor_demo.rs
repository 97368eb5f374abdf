//! Boots the plane-cursor program on the emulated console and drives it
//! through the gamepad, checking what lands in video memory each frame.

use genesis::{Buttons, JoyPort, PalSlot, Plane, TileAttr};
use mdv_core::console::Console;
use mdv_core::renderer::FrameBuffer;
use mdv_core::vram::Vram;
use plane_cursor::assets::{PALETTE_BASIC, VRAM_POS_TILE_CURSOR, VRAM_POS_TILE_FILL};

fn boot() -> Console {
    Console::power_on(|vdp, joy| plane_cursor::run(vdp, joy)).unwrap()
}

/// Every plane A cell that isn't empty.
fn occupied(vram: &Vram) -> Vec<(u16, u16, TileAttr)> {
    vram.plane(Plane::A).iter().filter(|(_, _, attr)| *attr != TileAttr::EMPTY).collect()
}

/// Where the cursor is, checking that it's the only thing on plane A.
fn cursor(console: &Console) -> (u16, u16) {
    console.with_vram(|vram| {
        let cells = occupied(vram);
        assert_eq!(cells.len(), 1, "plane A should hold exactly one tile, found {:?}", cells);
        let (x, y, attr) = cells[0];
        assert_eq!(attr, TileAttr::tile(VRAM_POS_TILE_CURSOR));
        (x, y)
    })
}

/// One frame with `buttons` down on pad 1, one frame with nothing.
fn tap(console: &mut Console, buttons: Buttons) {
    console.set_buttons(JoyPort::Joy1, buttons);
    console.step_frame().unwrap();
    console.set_buttons(JoyPort::Joy1, Buttons::empty());
    console.step_frame().unwrap();
}

#[test]
fn boot_fills_plane_b_and_centers_the_cursor() {
    let console = boot();

    console.with_vram(|vram| {
        assert_eq!(vram.find_tile(Plane::B, VRAM_POS_TILE_FILL).len(), 40 * 28);
        assert_eq!(*vram.palette(PalSlot::Pal0), PALETTE_BASIC);
        assert_eq!(vram.stats().cpu_tiles, 2);
        assert_eq!(vram.stats().dma_tiles, 0);
        assert_eq!(vram.stats().dropped_writes, 0);
    });
    assert_eq!(cursor(&console), (20, 14));
}

#[test]
fn right_then_down_clamps_at_the_bottom_row() {
    let mut console = boot();

    tap(&mut console, Buttons::RIGHT);
    assert_eq!(cursor(&console), (21, 14));
    assert_eq!(console.with_vram(|v| v.cell(Plane::A, 20, 14)), Some(TileAttr::EMPTY));

    for _ in 0..14 {
        tap(&mut console, Buttons::DOWN);
        let (x, y) = cursor(&console);
        assert_eq!(x, 21);
        assert!(y <= 27);
    }
    assert_eq!(cursor(&console), (21, 27));
}

#[test]
fn holding_a_direction_moves_once() {
    let mut console = boot();

    console.press(JoyPort::Joy1, Buttons::RIGHT);
    for _ in 0..10 {
        console.step_frame().unwrap();
    }
    assert_eq!(cursor(&console), (21, 14));
}

#[test]
fn left_beats_up() {
    let mut console = boot();

    tap(&mut console, Buttons::LEFT | Buttons::UP);
    assert_eq!(cursor(&console), (19, 14));
}

#[test]
fn left_edge_holds() {
    let mut console = boot();

    for _ in 0..25 {
        tap(&mut console, Buttons::LEFT);
    }
    assert_eq!(cursor(&console), (0, 14));
}

#[test]
fn pad_two_and_buttons_without_direction_are_ignored() {
    let mut console = boot();

    console.press(JoyPort::Joy2, Buttons::LEFT);
    console.step_frame().unwrap();
    tap(&mut console, Buttons::A | Buttons::START);
    console.release(JoyPort::Joy2, Buttons::LEFT);
    console.step_frame().unwrap();

    assert_eq!(cursor(&console), (20, 14));
}

#[test]
fn long_walk_stays_on_screen() {
    let mut console = boot();
    // biased toward up/left so those edges get hit
    let dirs = [Buttons::LEFT, Buttons::RIGHT, Buttons::UP, Buttons::DOWN, Buttons::LEFT, Buttons::UP];

    let mut seed: u32 = 0x1234_5678;
    for _ in 0..300 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        tap(&mut console, dirs[(seed >> 16) as usize % dirs.len()]);

        let (x, y) = cursor(&console);
        assert!(x < 40 && y < 28, "cursor left the screen at ({}, {})", x, y);
    }
}

#[test]
fn cursor_frame_shows_the_fill_through_its_middle() {
    let mut console = boot();
    tap(&mut console, Buttons::DOWN);

    let mut fb = FrameBuffer::default();
    console.render(&mut fb);

    let (ox, oy) = (20 * 8, 15 * 8);
    assert_eq!(fb.pixel(ox, oy), [255, 0, 255, 255]);
    assert_eq!(fb.pixel(ox + 4, oy + 4), [255, 255, 255, 255]);
    assert_eq!(fb.pixel(ox, oy - 8), [255, 255, 255, 255]);
}
