#![allow(clippy::tabs_in_doc_comments)]

/*!
Color science and palette-grid engine for designing accessible color systems.

A palette is a rectangular grid of colors: rows are hues, columns are tones. Colors are edited in a perceptual LCH space (CIE LCh or OkLCh) and projected to sRGB hex for display, with out-of-gamut values clipped rather than rejected. Every edit goes through `GridEditor` and is a pure transform from one immutable `Snapshot` to the next, which makes undo, redo and change detection a matter of keeping and comparing values.

Pairs of colors can be scored with WCAG 2.1 contrast, APCA lightness contrast or CIEDE2000 delta-E.

```rust
use palette_grid::{ColorSpace, ContrastMode, GridEditor, contrast_between};

let editor = GridEditor::default();
let snapshot = editor.default_snapshot();

// Select a swatch, then make it a bit darker.
let snapshot = editor.set_selection(&snapshot, 2, 1)?;
let snapshot = editor.nudge_lightness(&snapshot, 2, 1, -5.0)?;
let swatch = snapshot.selected_color().unwrap();

assert_eq!(swatch.hex(), ColorSpace::CieLch.to_hex(swatch.lch()));

let ratio = contrast_between("#FFFFFF", &swatch.hex(), ContrastMode::Wcag)?;
assert!(ratio.unwrap() > 1.0);

// Persist only the grid.
let json = snapshot.palette().to_json()?;
let restored = editor.load(&json)?;
assert_eq!(restored.palette(), snapshot.palette());
# Ok::<(), palette_grid::PaletteError>(())
```
*/

pub mod color;
pub mod color_space;
pub mod config;
pub mod contrast;
pub mod editor;
pub mod error;
pub mod grid;
pub mod parse;
pub mod selection;
pub mod snapshot;
pub mod store;

pub use color::Color;
pub use color_space::{ColorSpace, Lab, Lch, Rgb};
pub use config::EditorConfig;
pub use contrast::{ContrastMode, contrast_between, truncate_score};
pub use editor::GridEditor;
pub use error::{Axis, PaletteError, Result};
pub use grid::{Palette, PaletteFile};
pub use parse::parse_color;
pub use selection::{Direction, Position, Selection};
pub use snapshot::Snapshot;
pub use store::SharedSnapshot;
