//! The column tree model.
//!
//! A [`Column<T>`] is one header cell. A leaf column turns a `&T` into one
//! data cell; a group column projects `&T` to some `U` and hands that value
//! to its children, which are `Column<U>`. Because the child type is fixed by
//! the parent's projector, a tree whose projector chain does not line up is
//! rejected by the compiler instead of failing mid-render.
//!
//! Header layout only needs titles and nesting, so the typed tree is also
//! viewable as a tree of [`HeaderNode`] trait objects.

use std::fmt;
use std::marker::PhantomData;

use crate::error::SurfaceError;
use crate::layout::data::{write_forest, RowWriter};
use crate::value::CellValue;

/// Structural view of a column: a title plus ordered children.
pub trait HeaderNode {
    fn title(&self) -> &str;

    /// Number of direct children; 0 for a leaf.
    fn child_count(&self) -> usize;

    /// The child at `idx`, in declaration order.
    fn child(&self, idx: usize) -> Option<&dyn HeaderNode>;

    fn is_leaf(&self) -> bool {
        self.child_count() == 0
    }

    /// Number of data columns under this node; 1 for a leaf.
    fn count_leaves(&self) -> u32 {
        if self.is_leaf() {
            return 1;
        }
        header_children(self).fold(0u32, |total, child| {
            total.saturating_add(child.count_leaves())
        })
    }

    /// Number of header rows this node occupies, counting itself.
    fn depth(&self) -> u32 {
        header_children(self)
            .map(|child| child.depth())
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }
}

impl<N: HeaderNode + ?Sized> HeaderNode for &N {
    fn title(&self) -> &str {
        (**self).title()
    }

    fn child_count(&self) -> usize {
        (**self).child_count()
    }

    fn child(&self, idx: usize) -> Option<&dyn HeaderNode> {
        (**self).child(idx)
    }

    fn count_leaves(&self) -> u32 {
        (**self).count_leaves()
    }

    fn depth(&self) -> u32 {
        (**self).depth()
    }
}

/// The direct children of `node`, left to right.
pub fn header_children<N: HeaderNode + ?Sized>(
    node: &N,
) -> impl Iterator<Item = &dyn HeaderNode> + '_ {
    (0..node.child_count()).filter_map(move |idx| node.child(idx))
}

/// Total number of data columns produced by a forest.
pub fn count_leaves<N: HeaderNode>(forest: &[N]) -> u32 {
    forest
        .iter()
        .fold(0u32, |total, node| total.saturating_add(node.count_leaves()))
}

/// Number of header rows a forest needs; 0 for an empty forest.
pub fn depth<N: HeaderNode>(forest: &[N]) -> u32 {
    forest.iter().map(HeaderNode::depth).max().unwrap_or(0)
}

type LeafFn<T> = Box<dyn Fn(&T) -> CellValue + Send + Sync>;

/// One node of a column tree whose projectors take `&T`.
pub struct Column<T> {
    pub(crate) title: String,
    pub(crate) kind: ColumnKind<T>,
}

pub(crate) enum ColumnKind<T> {
    Leaf(LeafFn<T>),
    Group(Box<dyn GroupNode<T>>),
}

/// A group column with its projector output type erased.
pub(crate) trait GroupNode<T>: Send + Sync {
    fn child_count(&self) -> usize;

    fn child(&self, idx: usize) -> Option<&dyn HeaderNode>;

    /// Project `input` (unless absent) and write the children's cells.
    fn write(&self, input: Option<&T>, row: &mut RowWriter<'_>) -> Result<(), SurfaceError>;
}

impl<T: 'static> Column<T> {
    /// A leaf column producing one data cell per record.
    ///
    /// `Option` outputs write an empty cell for `None`.
    pub fn leaf<V, F>(title: impl Into<String>, project: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<CellValue>,
    {
        Self {
            title: title.into(),
            kind: ColumnKind::Leaf(Box::new(move |input: &T| project(input).into())),
        }
    }

    /// A group column whose children receive `project(input)`.
    pub fn group<U, F>(title: impl Into<String>, project: F, children: Vec<Column<U>>) -> Self
    where
        U: 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        Self::group_opt(title, move |input: &T| Some(project(input)), children)
    }

    /// A group column whose projection may be absent.
    ///
    /// When it is, none of the descendants' projectors run and every leaf
    /// underneath writes an empty cell.
    pub fn group_opt<U, F>(title: impl Into<String>, project: F, children: Vec<Column<U>>) -> Self
    where
        U: 'static,
        F: Fn(&T) -> Option<U> + Send + Sync + 'static,
    {
        Self {
            title: title.into(),
            kind: ColumnKind::Group(Box::new(OwnedGroup {
                project,
                children,
                _input: PhantomData,
            })),
        }
    }

    /// A group column that borrows its children's input out of its own.
    pub fn group_ref<U, F>(title: impl Into<String>, project: F, children: Vec<Column<U>>) -> Self
    where
        U: 'static,
        F: for<'a> Fn(&'a T) -> Option<&'a U> + Send + Sync + 'static,
    {
        Self {
            title: title.into(),
            kind: ColumnKind::Group(Box::new(RefGroup {
                project,
                children,
                _marker: PhantomData,
            })),
        }
    }

    /// A purely visual group: children see the same input as this node.
    pub fn nest(title: impl Into<String>, children: Vec<Column<T>>) -> Self {
        Self::group_ref(title, |input: &T| Some(input), children)
    }
}

impl<T> Column<T> {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ColumnKind::Group(_))
    }
}

impl<T> HeaderNode for Column<T> {
    fn title(&self) -> &str {
        &self.title
    }

    fn child_count(&self) -> usize {
        match &self.kind {
            ColumnKind::Leaf(_) => 0,
            ColumnKind::Group(group) => group.child_count(),
        }
    }

    fn child(&self, idx: usize) -> Option<&dyn HeaderNode> {
        match &self.kind {
            ColumnKind::Leaf(_) => None,
            ColumnKind::Group(group) => group.child(idx),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(if self.is_group() { "Group" } else { "Leaf" });
        s.field("title", &self.title);
        if !self.is_leaf() {
            let titles: Vec<&str> = header_children(self).map(|c| c.title()).collect();
            s.field("children", &titles);
        }
        s.finish()
    }
}

struct OwnedGroup<T, U, F> {
    project: F,
    children: Vec<Column<U>>,
    _input: PhantomData<fn(&T)>,
}

impl<T, U, F> GroupNode<T> for OwnedGroup<T, U, F>
where
    U: 'static,
    F: Fn(&T) -> Option<U> + Send + Sync,
{
    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child(&self, idx: usize) -> Option<&dyn HeaderNode> {
        self.children.get(idx).map(|c| c as &dyn HeaderNode)
    }

    fn write(&self, input: Option<&T>, row: &mut RowWriter<'_>) -> Result<(), SurfaceError> {
        let value = input.and_then(|input| (self.project)(input));
        write_forest(&self.children, value.as_ref(), row)
    }
}

struct RefGroup<T, U, F> {
    project: F,
    children: Vec<Column<U>>,
    _marker: PhantomData<fn(&T) -> &U>,
}

impl<T, U, F> GroupNode<T> for RefGroup<T, U, F>
where
    U: 'static,
    F: for<'a> Fn(&'a T) -> Option<&'a U> + Send + Sync,
{
    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child(&self, idx: usize) -> Option<&dyn HeaderNode> {
        self.children.get(idx).map(|c| c as &dyn HeaderNode)
    }

    fn write(&self, input: Option<&T>, row: &mut RowWriter<'_>) -> Result<(), SurfaceError> {
        let value = input.and_then(|input| (self.project)(input));
        write_forest(&self.children, value, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Person {
        name: String,
        address: Address,
    }

    struct Address {
        city: String,
        zip: u32,
    }

    fn person_columns() -> Vec<Column<Person>> {
        vec![
            Column::leaf("Name", |p: &Person| p.name.clone()),
            Column::group_ref(
                "Address",
                |p: &Person| Some(&p.address),
                vec![
                    Column::leaf("City", |a: &Address| a.city.clone()),
                    Column::leaf("Zip", |a: &Address| a.zip),
                ],
            ),
        ]
    }

    #[test]
    fn test_leaf_has_one_leaf_and_depth_one() {
        let col = Column::leaf("A", |n: &i32| *n);
        assert!(col.is_leaf());
        assert_eq!(col.count_leaves(), 1);
        assert_eq!(col.depth(), 1);
    }

    #[test]
    fn test_group_counts_and_depth() {
        let columns = person_columns();
        assert_eq!(count_leaves(&columns), 3);
        assert_eq!(depth(&columns), 2);
        assert_eq!(columns.iter().map(HeaderNode::count_leaves).collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn test_empty_forest() {
        let columns: Vec<Column<Person>> = Vec::new();
        assert_eq!(count_leaves(&columns), 0);
        assert_eq!(depth(&columns), 0);
    }

    #[test]
    fn test_debug_lists_child_titles() {
        let columns = person_columns();
        let debug = format!("{:?}", columns.get(1));
        assert!(debug.contains("Group"));
        assert!(debug.contains("\"City\""));
        assert!(debug.contains("\"Zip\""));
    }

    #[test]
    fn test_columns_are_send_and_sync() {
        fn assert_send_sync<S: Send + Sync>(_: &S) {}
        assert_send_sync(&person_columns());
    }
}
