//! Renders [`Node`] trees as canonical query text.
//!
//! Two layouts are supported, and both parse back into the same tree:
//!
//! - [`Layout::Compact`]: everything on one line, separated by single spaces
//!   (`project { name owner { email } }`)
//! - [`Layout::Pretty`]: one selection per line, indented by `indent` spaces
//!   per nesting level

use crate::value::write_arguments;
use crate::Child;
use crate::Node;
use std::fmt;
use std::fmt::Write;

/// The indent used by [`SerializeOptions::pretty`] defaults and by `{:#}`.
pub const DEFAULT_INDENT: usize = 2;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Layout {
    #[default]
    Compact,
    Pretty {
        indent: usize,
    },
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SerializeOptions {
    pub layout: Layout,
}

impl SerializeOptions {
    pub fn compact() -> Self {
        Self {
            layout: Layout::Compact,
        }
    }

    pub fn pretty(indent: usize) -> Self {
        Self {
            layout: Layout::Pretty { indent },
        }
    }
}

/// Serializes `node` into query text.
///
/// ```rust
/// use grafik::Node;
/// use grafik::SerializeOptions;
///
/// let node = Node::builder("project")
///     .child("name")
///     .child(Node::builder("owner").child("email").build().unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     grafik::serialize(&node, &SerializeOptions::compact()),
///     "project { name owner { email } }",
/// );
/// assert_eq!(
///     grafik::serialize(&node, &SerializeOptions::pretty(2)),
///     "project {\n  name\n  owner {\n    email\n  }\n}",
/// );
/// ```
pub fn serialize(node: &Node, options: &SerializeOptions) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_node(&mut out, node, options);
    out
}

/// Serializes a list of top-level selections (e.g. the result of
/// [`parse()`](crate::parse)), separated the same way siblings are.
pub fn serialize_children(children: &[Child], options: &SerializeOptions) -> String {
    let mut out = String::new();
    let mut writer = LineWriter::new(&mut out, options.layout);
    for child in children {
        let _ = writer.write_child(child, 0);
    }
    out
}

pub(crate) fn write_node<W: Write>(
    out: &mut W,
    node: &Node,
    options: &SerializeOptions,
) -> fmt::Result {
    LineWriter::new(out, options.layout).write_node(node, 0)
}

/// Writes "lines" of output: single-space separated in the compact layout,
/// newline separated and indented in the pretty layout.
struct LineWriter<'a, W: Write> {
    layout: Layout,
    out: &'a mut W,
    started: bool,
}

impl<'a, W: Write> LineWriter<'a, W> {
    fn new(out: &'a mut W, layout: Layout) -> Self {
        Self {
            layout,
            out,
            started: false,
        }
    }

    fn begin_line(&mut self, depth: usize) -> fmt::Result {
        match self.layout {
            Layout::Compact => {
                if self.started {
                    self.out.write_char(' ')?;
                }
            },
            Layout::Pretty { indent } => {
                if self.started {
                    self.out.write_char('\n')?;
                }
                for _ in 0..depth * indent {
                    self.out.write_char(' ')?;
                }
            },
        }
        self.started = true;
        Ok(())
    }

    fn write_child(&mut self, child: &Child, depth: usize) -> fmt::Result {
        match child {
            Child::Field(text) => {
                self.begin_line(depth)?;
                self.out.write_str(text)
            },
            Child::Node(node) => self.write_node(node, depth),
        }
    }

    /// `alias: name(arguments) {`, children one level deeper, then `}`.
    ///
    /// A transparent node's arguments and children are those of the node it
    /// wraps, so the wrapped layer never shows up in the output.
    fn write_node(&mut self, node: &Node, depth: usize) -> fmt::Result {
        let has_header = !node.name().is_empty() || !node.arguments().is_empty();
        if !has_header && !node.has_children() {
            return Ok(());
        }

        self.begin_line(depth)?;
        if let Some(alias) = node.alias() {
            write!(self.out, "{alias}: ")?;
        }
        self.out.write_str(node.name())?;
        if !node.arguments().is_empty() {
            self.out.write_char('(')?;
            write_arguments(&mut *self.out, node.arguments())?;
            self.out.write_char(')')?;
        }
        if !node.has_children() {
            return Ok(());
        }

        if has_header {
            self.out.write_char(' ')?;
        }
        self.out.write_char('{')?;
        for child in node.children() {
            self.write_child(child, depth + 1)?;
        }
        self.begin_line(depth)?;
        self.out.write_char('}')
    }
}
