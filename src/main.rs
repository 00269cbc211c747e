//! TILESMITH viewer
//!
//! Sheet on the left with the selection frame, zoomed paint view of the
//! selected tile on the right.
//!
//! Controls:
//! - Click the sheet to select a tile, click/drag the paint view to paint
//! - 1 / 2 / 3: pencil, eraser, fill
//! - [ / ]: previous / next palette color
//! - - / =: halve / double the tile size
//! - C: clear the sheet

use log::{info, warn};
use macroquad::prelude::*;

use tilesmith::config::EditorConfig;
use tilesmith::editor::{apply_tool, EditorState, PendingRefresh, Tool};
use tilesmith::raster::{Color as PixelColor, SoftwareSurface};
use tilesmith::tiles::{shared_tile_grid, TileGrid};
use tilesmith::VERSION;

const CONFIG_PATH: &str = "tilesmith.ron";
const MARGIN: f32 = 16.0;
const SWATCH: f32 = 20.0;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("TILESMITH v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Two-tone checker so an empty sheet is visibly tiled
fn demo_store(width: usize, height: usize, tile_size: usize) -> Vec<u8> {
    let light = PixelColor::rgb(0x5F, 0x57, 0x4F).to_bytes();
    let dark = PixelColor::rgb(0x1D, 0x2B, 0x53).to_bytes();
    let mut store = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let checker = ((x / tile_size) + (y / tile_size)) % 2 == 0;
            store.extend_from_slice(if checker { &light } else { &dark });
        }
    }
    store
}

fn to_mq_color(c: PixelColor) -> Color {
    Color::from_rgba(c.r, c.g, c.b, c.a)
}

fn surface_texture(surface: &SoftwareSurface) -> Texture2D {
    let tex = Texture2D::from_rgba8(surface.width() as u16, surface.height() as u16, surface.as_bytes());
    tex.set_filter(FilterMode::Nearest);
    tex
}

fn draw_scaled(tex: &Texture2D, x: f32, y: f32, w: f32, h: f32) {
    draw_texture_ex(
        tex,
        x,
        y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(w, h)),
            ..Default::default()
        },
    );
}

/// Sheet pixel under screen point, if inside the area
fn to_pixel(mx: f32, my: f32, x: f32, y: f32, scale: f32, w: usize, h: usize) -> Option<(usize, usize)> {
    if mx < x || my < y {
        return None;
    }
    let px = ((mx - x) / scale) as usize;
    let py = ((my - y) / scale) as usize;
    (px < w && py < h).then_some((px, py))
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let config = EditorConfig::load_or_default(CONFIG_PATH);
    let sheet = shared_tile_grid();

    let mut state = {
        let mut grid = sheet.lock().unwrap_or_else(|e| e.into_inner());
        *grid = config.tile_grid().unwrap_or_else(|e| {
            warn!("{}, using default sheet", e);
            TileGrid::new()
        });
        let (w, h) = (grid.width(), grid.height());
        grid.attach_store(demo_store(w, h, config.tile_size));

        let mut state = EditorState::from_config(&config);
        if let Err(e) = state.set_tile_size(&grid, config.tile_size) {
            warn!("tile size {}: {}", config.tile_size, e);
            state = EditorState::new();
        }
        state
    };
    info!("editing {}x{} sheet, tile size {}", config.sheet_width, config.sheet_height, state.tile_size);

    let zoom = config.zoom as f32;
    let mut tiles_surface = SoftwareSurface::new(config.sheet_width, config.sheet_height);
    let mut paint_surface = SoftwareSurface::new(state.tile_size, state.tile_size);
    let mut tiles_tex: Option<Texture2D> = None;
    let mut paint_tex: Option<Texture2D> = None;
    let mut refresh: Option<PendingRefresh> = None;
    let mut dirty = true;

    loop {
        let mut grid = sheet.lock().unwrap_or_else(|e| e.into_inner());
        let (sheet_w, sheet_h) = (grid.width(), grid.height());

        let sheet_x = MARGIN;
        let sheet_y = MARGIN;
        let sheet_screen_w = sheet_w as f32 * zoom;
        let sheet_screen_h = sheet_h as f32 * zoom;
        let paint_x = sheet_x + sheet_screen_w + MARGIN;
        let paint_y = sheet_y;
        let paint_scale = sheet_screen_h / state.tile_size as f32;

        // Keyboard
        for (key, tool) in [(KeyCode::Key1, Tool::Pencil), (KeyCode::Key2, Tool::Eraser), (KeyCode::Key3, Tool::Fill)] {
            if is_key_pressed(key) {
                state.tool = tool;
            }
        }
        if is_key_pressed(KeyCode::LeftBracket) {
            state.cycle_palette(false);
        }
        if is_key_pressed(KeyCode::RightBracket) {
            state.cycle_palette(true);
        }
        let resize = if is_key_pressed(KeyCode::Equal) {
            Some(state.tile_size * 2)
        } else if is_key_pressed(KeyCode::Minus) {
            Some(state.tile_size / 2)
        } else {
            None
        };
        if let Some(size) = resize {
            match state.set_tile_size(&grid, size) {
                Ok(()) => {
                    paint_surface = SoftwareSurface::new(size, size);
                    dirty = true;
                }
                Err(e) => info!("tile size {} rejected: {}", size, e),
            }
        }
        if is_key_pressed(KeyCode::C) {
            grid.clear();
            dirty = true;
        }

        // Mouse
        let (mx, my) = mouse_position();
        match to_pixel(mx, my, sheet_x, sheet_y, zoom, sheet_w, sheet_h) {
            Some((px, py)) => {
                state.hover(&grid, px, py);
                if is_mouse_button_pressed(MouseButton::Left) && state.select_at(&grid, px, py) {
                    dirty = true;
                }
            }
            None => state.hovered = None,
        }
        if is_mouse_button_down(MouseButton::Left) {
            let size = state.tile_size;
            if let Some((lx, ly)) = to_pixel(mx, my, paint_x, paint_y, paint_scale, size, size) {
                match apply_tool(&mut grid, &state, lx, ly) {
                    Ok(changed) => dirty |= changed,
                    Err(e) => warn!("{} failed: {}", state.tool.label(), e),
                }
            }
        }

        // Request a view refresh; a newer request replaces one in flight
        if dirty {
            refresh = PendingRefresh::request(&grid, &state).unwrap_or_else(|e| {
                warn!("view refresh failed: {}", e);
                None
            });
            dirty = false;
        }
        drop(grid);

        // Poll the refresh, upload when the bitmaps are ready
        if refresh.as_mut().is_some_and(PendingRefresh::is_complete) {
            if let Some(done) = refresh.take() {
                match done.finish(&mut tiles_surface, &mut paint_surface) {
                    Ok(()) => {
                        tiles_tex = Some(surface_texture(&tiles_surface));
                        paint_tex = Some(surface_texture(&paint_surface));
                    }
                    Err(e) => warn!("view refresh failed: {}", e),
                }
            }
        }

        // Draw
        clear_background(Color::from_rgba(24, 24, 28, 255));
        if let Some(tex) = &tiles_tex {
            draw_scaled(tex, sheet_x, sheet_y, sheet_screen_w, sheet_screen_h);
        }
        if let Some(tex) = &paint_tex {
            draw_scaled(tex, paint_x, paint_y, sheet_screen_h, sheet_screen_h);
        }
        draw_rectangle_lines(paint_x, paint_y, sheet_screen_h, sheet_screen_h, 1.0, GRAY);

        if let Some((_, origin)) = state.hovered {
            let size = state.tile_size as f32 * zoom;
            draw_rectangle_lines(
                sheet_x + origin.x as f32 * zoom,
                sheet_y + origin.y as f32 * zoom,
                size,
                size,
                1.0,
                Color::new(1.0, 1.0, 1.0, 0.35),
            );
        }

        // Palette
        let palette_y = sheet_y + sheet_screen_h + MARGIN;
        for i in 0..state.palette.len() {
            let x = sheet_x + i as f32 * (SWATCH + 4.0);
            if let Some(c) = state.palette.color(i) {
                draw_rectangle(x, palette_y, SWATCH, SWATCH, to_mq_color(c));
            }
            if i == state.palette_index {
                draw_rectangle_lines(x - 2.0, palette_y - 2.0, SWATCH + 4.0, SWATCH + 4.0, 2.0, WHITE);
            }
        }

        let status = format!(
            "{}  |  tile {} ({}px) at {},{}  |  color #{:08X}",
            state.tool.label(),
            state.selected_tile,
            state.tile_size,
            state.selection.x,
            state.selection.y,
            state.selected_color().to_packed(),
        );
        draw_text(&status, sheet_x, palette_y + SWATCH + 24.0, 20.0, LIGHTGRAY);

        next_frame().await;
    }
}
