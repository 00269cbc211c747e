//! Editor state: tile size, selection, hover, tool and palette choice
//!
//! This is what the UI layer keeps between frames and feeds into the tile
//! grid. It holds no pixels; the sheet is always passed in.

use crate::config::EditorConfig;
use crate::error::Result;
use crate::raster::Color;
use crate::tiles::{Selection, TileGrid, TileOrigin};

/// Default tile edge in pixels
pub const DEFAULT_TILE_SIZE: usize = 8;

/// Painting tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Pencil = 0,
    Eraser = 1,
    Fill = 2,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Pencil, Tool::Eraser, Tool::Fill];

    pub fn label(&self) -> &'static str {
        match self {
            Tool::Pencil => "Pencil",
            Tool::Eraser => "Eraser",
            Tool::Fill => "Fill",
        }
    }

    pub fn from_index(i: usize) -> Option<Tool> {
        Tool::ALL.get(i).copied()
    }
}

/// Fixed set of packed `0xRRGGBBAA` colors to paint with
///
/// Entry 0 is transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<u32>,
}

/// 16-color default (PICO-8 style), packed RGBA
pub const DEFAULT_PALETTE: [u32; 16] = [
    0x0000_0000, 0x1D2B_53FF, 0x7E25_53FF, 0x0087_51FF,
    0xAB52_36FF, 0x5F57_4FFF, 0xC2C3_C7FF, 0xFFF1_E8FF,
    0xFF00_4DFF, 0xFFA3_00FF, 0xFFEC_27FF, 0x00E4_36FF,
    0x29AD_FFFF, 0x8376_9CFF, 0xFF77_A8FF, 0xFFCC_AAFF,
];

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE.to_vec())
    }
}

impl Palette {
    pub fn new(colors: Vec<u32>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Entry `index` unpacked
    pub fn color(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied().map(Color::from_packed)
    }
}

/// Per-session editor state
#[derive(Debug, Clone)]
pub struct EditorState {
    /// Tile edge in pixels
    pub tile_size: usize,
    /// Origin of the selected tile
    pub selection: TileOrigin,
    /// Row-major index of the selected tile
    pub selected_tile: usize,
    /// Tile under the mouse on the sheet view, if any
    pub hovered: Option<(usize, TileOrigin)>,
    pub tool: Tool,
    pub palette: Palette,
    /// Palette entry painted by the pencil and fill tools
    pub palette_index: usize,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            selection: TileOrigin::default(),
            selected_tile: 0,
            hovered: None,
            tool: Tool::default(),
            palette: Palette::default(),
            // first opaque entry
            palette_index: 1,
        }
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            tile_size: config.tile_size,
            ..Self::default()
        }
    }

    /// Current palette color (transparent if the index is past the palette)
    pub fn selected_color(&self) -> Color {
        self.palette.color(self.palette_index).unwrap_or(Color::TRANSPARENT)
    }

    /// Step through the palette, wrapping at both ends
    pub fn cycle_palette(&mut self, forward: bool) {
        let len = self.palette.len();
        if len == 0 {
            return;
        }
        self.palette_index = if forward {
            (self.palette_index + 1) % len
        } else {
            (self.palette_index + len - 1) % len
        };
    }

    /// The current selection, checked against `grid`
    pub fn selection(&self, grid: &TileGrid) -> Result<Selection> {
        grid.select(self.tile_size, self.selection)
    }

    /// Select by row-major tile index; false if there is no such tile
    pub fn select_tile(&mut self, grid: &TileGrid, index: usize) -> bool {
        match grid.tile_origin(index, self.tile_size) {
            Some(origin) => {
                self.selected_tile = index;
                self.selection = origin;
                true
            }
            None => false,
        }
    }

    /// Select the tile containing sheet pixel `(x, y)`
    pub fn select_at(&mut self, grid: &TileGrid, x: usize, y: usize) -> bool {
        match grid.tile_at(x, y, self.tile_size) {
            Some((index, origin)) => {
                self.selected_tile = index;
                self.selection = origin;
                true
            }
            None => false,
        }
    }

    /// Track the tile under sheet pixel `(x, y)`
    pub fn hover(&mut self, grid: &TileGrid, x: usize, y: usize) {
        self.hovered = grid.tile_at(x, y, self.tile_size);
    }

    /// Change the tile size and reset the selection to tile 0
    ///
    /// Fails (leaving the state unchanged) if a tile of that size does not
    /// fit in the sheet.
    pub fn set_tile_size(&mut self, grid: &TileGrid, tile_size: usize) -> Result<()> {
        grid.select(tile_size, TileOrigin::default())?;
        self.tile_size = tile_size;
        self.selection = TileOrigin::default();
        self.selected_tile = 0;
        self.hovered = None;
        Ok(())
    }
}
