//! Rows of the scatter plot and their stable identities.

use serde::{Deserialize, Serialize};

/// One of the three numeric fields carried by every [`Row`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    X,
    Y,
    Z,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::X, Field::Y, Field::Z];

    pub fn key(&self) -> &'static str {
        match self {
            Field::X => "x",
            Field::Y => "y",
            Field::Z => "z",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A data record with three numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Row {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::X => self.x,
            Field::Y => self.y,
            Field::Z => self.z,
        }
    }

    pub fn set(&mut self, field: Field, value: f64) {
        match field {
            Field::X => self.x = value,
            Field::Y => self.y = value,
            Field::Z => self.z = value,
        }
    }
}

/// Stable identity of a row inside a [`RowSet`]. Used as the marker key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered collection of rows. Ids are never reused within one set.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    rows: Vec<(RowId, Row)>,
    next_id: u64,
}

impl RowSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: Row) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push((id, row));
        id
    }

    pub fn remove(&mut self, id: RowId) -> Option<Row> {
        let pos = self.rows.iter().position(|(rid, _)| *rid == id)?;
        Some(self.rows.remove(pos).1)
    }

    pub fn get(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|(rid, _)| *rid == id).map(|(_, r)| r)
    }

    pub fn get_mut(&mut self, id: RowId) -> Option<&mut Row> {
        self.rows
            .iter_mut()
            .find(|(rid, _)| *rid == id)
            .map(|(_, r)| r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RowId, &Row)> + '_ {
        self.rows.iter().map(|(id, r)| (*id, r))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (RowId, &mut Row)> + '_ {
        self.rows.iter_mut().map(|(id, r)| (*id, r))
    }

    pub fn ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|(id, _)| *id).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub(crate) fn entries(&self) -> &[(RowId, Row)] {
        &self.rows
    }
}

impl FromIterator<Row> for RowSet {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        let mut set = RowSet::new();
        for row in iter {
            set.push(row);
        }
        set
    }
}
