use crate::{editor::GridEditor, error::Result, snapshot::Snapshot};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

/**
Holds the current snapshot for callers that edit from more than one thread.

Readers get an `Arc` to the snapshot that was current when they asked and can keep using it for as long as they like. Writers compute a new snapshot from a captured one outside the lock and then swap the pointer.

Conflicting edits are resolved by last writer wins: `update` always installs its result, even if another writer swapped in between, and nothing is merged. Use `compare_and_swap` to detect that case instead.
*/
#[derive(Debug, Default)]
pub struct SharedSnapshot {
	current: RwLock<Arc<Snapshot>>,
}

impl SharedSnapshot {
	pub fn new(snapshot: Snapshot) -> Self {
		Self {
			current: RwLock::new(Arc::new(snapshot)),
		}
	}

	pub fn current(&self) -> Arc<Snapshot> {
		// A poisoned lock still holds a complete snapshot; the pointer is swapped in one step.
		Arc::clone(&*self.current.read().unwrap_or_else(PoisonError::into_inner))
	}

	/**
	Installs `snapshot` and returns the one it replaced.
	*/
	pub fn replace(&self, snapshot: Snapshot) -> Arc<Snapshot> {
		std::mem::replace(&mut *self.write(), Arc::new(snapshot))
	}

	/**
	Applies a command to the current snapshot and installs the result, last writer wins.

	If the command fails, nothing is installed.

	```rust
	use palette_grid::{GridEditor, SharedSnapshot};

	let editor = GridEditor::default();
	let shared = SharedSnapshot::new(editor.default_snapshot());

	shared.update(|snapshot| editor.add_tone(snapshot))?;
	assert_eq!(shared.current().palette().tones(), 6);
	# Ok::<(), palette_grid::PaletteError>(())
	```
	*/
	pub fn update<F>(&self, command: F) -> Result<Arc<Snapshot>>
	where
		F: FnOnce(&Snapshot) -> Result<Snapshot>,
	{
		let captured = self.current();
		let next = Arc::new(command(&captured)?);
		*self.write() = Arc::clone(&next);
		Ok(next)
	}

	/**
	Installs `next` only if `expected` is still the current snapshot (by identity).

	On conflict the current snapshot is returned as the error so the caller can recompute from it.
	*/
	pub fn compare_and_swap(&self, expected: &Arc<Snapshot>, next: Snapshot) -> std::result::Result<Arc<Snapshot>, Arc<Snapshot>> {
		let mut current = self.write();
		if Arc::ptr_eq(&*current, expected) {
			let next = Arc::new(next);
			*current = Arc::clone(&next);
			Ok(next)
		} else {
			log::debug!("Snapshot swap lost to a concurrent edit");
			Err(Arc::clone(&*current))
		}
	}

	/**
	Replaces the current palette with one parsed from JSON. A malformed palette leaves the current snapshot in place.
	*/
	pub fn load_json(&self, editor: &GridEditor, json: &str) -> Result<Arc<Snapshot>> {
		let next = Arc::new(editor.load(json)?);
		*self.write() = Arc::clone(&next);
		Ok(next)
	}

	fn write(&self) -> RwLockWriteGuard<'_, Arc<Snapshot>> {
		self.current.write().unwrap_or_else(PoisonError::into_inner)
	}
}
