//! Recognition of matrices like `[(a,b),(c,d)]` and case distinctions like
//! `{(1, if x > 0), (0, if x <= 0):}`.

use mathml_tree::ast::Node;
use mathml_tree::tag::{Attribute, Tag};

use crate::fragment::{Fragment, Group, flatten};

/// Turn the content of a closed group into a table, if it has the shape of one.
///
/// The content must be at least two rows separated by commas. Every row must be a closed group
/// with the same brackets as the first row, and every row must have the same number of cells.
/// If the shape doesn't match, the content is handed back unchanged.
pub(crate) fn try_into_table(content: Vec<Fragment>) -> Result<Node, Vec<Fragment>> {
    let Some(columns) = table_columns(&content) else {
        return Err(content);
    };
    let cases = columns == 2 && content.iter().step_by(2).all(is_case_row);
    let rows = content
        .into_iter()
        .filter_map(|fragment| match fragment {
            Fragment::Group(row) => Some(build_row(row)),
            _ => None,
        })
        .collect();
    let mut table = Node::container(Tag::Mtable, rows);
    if cases {
        table.set_attr(Attribute::Columnalign, "left");
    }
    Ok(table)
}

/// The number of columns, if `content` has the shape of a table.
fn table_columns(content: &[Fragment]) -> Option<usize> {
    if content.len() < 3 || content.len() % 2 == 0 {
        return None;
    }
    if !content.iter().skip(1).step_by(2).all(Fragment::is_comma) {
        return None;
    }
    let first = row_group(&content[0])?;
    let columns = count_cells(&first.content);
    for fragment in content.iter().step_by(2).skip(1) {
        let row = row_group(fragment)?;
        let same_brackets = row.open.output == first.open.output
            && row.close.map(|c| c.output) == first.close.map(|c| c.output);
        if !same_brackets || count_cells(&row.content) != columns {
            return None;
        }
    }
    Some(columns)
}

fn row_group(fragment: &Fragment) -> Option<&Group> {
    match fragment {
        Fragment::Group(group) if group.close.is_some() && !group.bars => Some(group),
        _ => None,
    }
}

fn count_cells(content: &[Fragment]) -> usize {
    1 + content.iter().filter(|fragment| fragment.is_comma()).count()
}

/// A row whose second cell starts with an operator word like `if`.
fn is_case_row(fragment: &Fragment) -> bool {
    let Fragment::Group(row) = fragment else {
        return false;
    };
    let mut cells = row.content.split(Fragment::is_comma);
    cells.next();
    matches!(
        cells.next().and_then(<[Fragment]>::first),
        Some(Fragment::Keyword(_))
    )
}

fn build_row(row: Group) -> Node {
    let mut cells = Vec::new();
    let mut cell = Vec::new();
    for fragment in row.content {
        if fragment.is_comma() {
            cells.push(Node::container(Tag::Mtd, flatten(std::mem::take(&mut cell))));
        } else {
            cell.push(fragment);
        }
    }
    cells.push(Node::container(Tag::Mtd, flatten(cell)));
    Node::container(Tag::Mtr, cells)
}
