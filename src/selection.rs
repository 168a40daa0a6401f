use crate::error::Axis;

/**
A cell coordinate in the grid.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
	pub hue: usize,
	pub tone: usize,
}

impl Position {
	pub const fn new(hue: usize, tone: usize) -> Self {
		Self { hue, tone }
	}

	fn get(self, axis: Axis) -> usize {
		match axis {
			Axis::Hue => self.hue,
			Axis::Tone => self.tone,
		}
	}

	fn with(self, axis: Axis, index: usize) -> Self {
		match axis {
			Axis::Hue => Self { hue: index, ..self },
			Axis::Tone => Self { tone: index, ..self },
		}
	}
}

/**
Arrow-key style navigation. Up and down walk hues (rows), left and right walk tones (columns).
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	Up,
	Down,
	Left,
	Right,
}

/**
The active cell, or none.

A selection is attached to its logical row and column: the remapping methods follow it through structural edits so it keeps pointing at the same color. Keeping it within bounds is the editor's job; a `Snapshot` never holds a selection outside its grid.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection(Option<Position>);

impl Selection {
	pub const fn none() -> Self {
		Self(None)
	}

	pub const fn at(hue: usize, tone: usize) -> Self {
		Self(Some(Position::new(hue, tone)))
	}

	pub fn position(self) -> Option<Position> {
		self.0
	}

	pub fn is_none(self) -> bool {
		self.0.is_none()
	}

	pub(crate) fn fits(self, hues: usize, tones: usize) -> bool {
		self.0.is_none_or(|p| p.hue < hues && p.tone < tones)
	}

	fn remap(self, axis: Axis, f: impl FnOnce(usize) -> usize) -> Self {
		Self(self.0.map(|p| p.with(axis, f(p.get(axis)))))
	}

	/**
	Follows a row or column inserted at `index`: anything at or after it shifts by one.
	*/
	pub(crate) fn after_insert(self, axis: Axis, index: usize) -> Self {
		self.remap(axis, |i| if i >= index { i + 1 } else { i })
	}

	/**
	Follows a removal at `index`, leaving `remaining` rows or columns (at least one).

	A selection on the removed line moves to the nearest remaining one: the line that took its place, or the new last line when the last was removed.
	*/
	pub(crate) fn after_remove(self, axis: Axis, index: usize, remaining: usize) -> Self {
		self.remap(axis, |i| {
			if i > index {
				i - 1
			} else if i == index {
				index.min(remaining.saturating_sub(1))
			} else {
				i
			}
		})
	}

	/**
	Follows a move of the line at `from` to `to`.
	*/
	pub(crate) fn after_move(self, axis: Axis, from: usize, to: usize) -> Self {
		self.remap(axis, |i| {
			if i == from {
				to
			} else if from < i && i <= to {
				i - 1
			} else if to <= i && i < from {
				i + 1
			} else {
				i
			}
		})
	}

	/**
	Steps one cell in `direction`, stopping at the grid edges. An empty selection starts at the first cell.
	*/
	pub(crate) fn step(self, direction: Direction, hues: usize, tones: usize) -> Self {
		let Some(p) = self.0 else {
			return Self::at(0, 0);
		};
		let p = match direction {
			Direction::Up => p.with(Axis::Hue, p.hue.saturating_sub(1)),
			Direction::Down => p.with(Axis::Hue, (p.hue + 1).min(hues.saturating_sub(1))),
			Direction::Left => p.with(Axis::Tone, p.tone.saturating_sub(1)),
			Direction::Right => p.with(Axis::Tone, (p.tone + 1).min(tones.saturating_sub(1))),
		};
		Self(Some(p))
	}
}

impl From<Position> for Selection {
	fn from(position: Position) -> Self {
		Self(Some(position))
	}
}
