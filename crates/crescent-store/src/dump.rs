//! Indented text rendering of the directory tree.
//!
//! ```text
//!  -- root/
//!     |
//!      -- orbital/
//!         |
//!          -- sun/
//!             |   - mass (double)
//! ```
//!
//! Each level indents by four spaces. Elements are listed before child
//! directories, both in creation order. The format is for humans and
//! may change.

use std::fmt;

use crescent_core::DirId;

use crate::directory::Directory;
use crate::store::Store;

const INDENT: &str = "    ";

/// [`Display`](fmt::Display) adapter over a store's tree.
#[derive(Clone, Copy, Debug)]
pub struct TreeDump<'s> {
    store: &'s Store,
}

impl<'s> TreeDump<'s> {
    pub(crate) fn new(store: &'s Store) -> Self {
        Self { store }
    }
}

fn indent(f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
    for _ in 0..level {
        f.write_str(INDENT)?;
    }
    Ok(())
}

fn write_dir(
    f: &mut fmt::Formatter<'_>,
    store: &Store,
    dir: Directory<'_>,
    level: usize,
) -> fmt::Result {
    indent(f, level)?;
    writeln!(f, " -- {}/", dir.name())?;

    for (name, id) in dir.elements() {
        indent(f, level + 1)?;
        match store.get_type(id) {
            Some(tag) => writeln!(f, "|   - {name} ({tag})")?,
            None => writeln!(f, "|   - {name}")?,
        }
    }

    for child in dir.subdirs() {
        indent(f, level + 1)?;
        writeln!(f, "|")?;
        write_dir(f, store, child, level + 1)?;
    }
    Ok(())
}

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.store.dir(DirId::ROOT) {
            Some(root) => write_dir(f, self.store, root, 0),
            None => Ok(()),
        }
    }
}
