//! In-memory aggregate of named layers and axis attributes
//!
//! A [`LayerSetView`] bundles a set of equally shaped in-memory layers
//! with per-row and per-column attribute columns, and exposes the same
//! sliced-access contract as a single layer by delegating to the default
//! layer. It is a pure in-memory object: dropping it has no persisted
//! side effects.

use hashbrown::HashMap;
use lamina_core::{BlockSlice, LayerError, Result, Selection, SparseTriplets};
use ndarray::Array2;

use crate::dense::DenseLayer;
use crate::layer::{Layer, LayerName};

/// Values of one attribute column along an axis
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttrValues {
    /// One string per coordinate
    Text(Vec<String>),
    /// One number per coordinate
    Numeric(Vec<f64>),
}

impl AttrValues {
    /// Number of per-coordinate values
    pub fn len(&self) -> usize {
        match self {
            AttrValues::Text(values) => values.len(),
            AttrValues::Numeric(values) => values.len(),
        }
    }

    /// Whether the attribute carries no values
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn render(&self, index: usize) -> String {
        match self {
            AttrValues::Text(values) => values[index].clone(),
            AttrValues::Numeric(values) => values[index].to_string(),
        }
    }
}

/// In-memory aggregate of named layers plus row/column attributes
pub struct LayerSetView {
    layers: HashMap<LayerName, DenseLayer>,
    row_attrs: Vec<(String, AttrValues)>,
    col_attrs: Vec<(String, AttrValues)>,
    shape: (usize, usize),
}

impl LayerSetView {
    /// Assemble a view from pre-built layers and attribute columns
    ///
    /// Requires at least one layer (the shape is derived from the
    /// layers, never assumed). Every layer must share one shape, row
    /// attributes must have one value per row, and column attributes one
    /// value per column; any disagreement is a `ShapeMismatch` carrying
    /// both shapes. Duplicate layer names are rejected.
    pub fn new(
        layers: Vec<DenseLayer>,
        row_attrs: Vec<(String, AttrValues)>,
        col_attrs: Vec<(String, AttrValues)>,
    ) -> Result<Self> {
        let shape = match layers.first() {
            Some(layer) => layer.shape(),
            None => return Err(LayerError::MissingDefaultLayer),
        };

        let mut by_name = HashMap::with_capacity(layers.len());
        for layer in layers {
            if layer.shape() != shape {
                return Err(LayerError::ShapeMismatch {
                    expected: shape,
                    actual: layer.shape(),
                });
            }
            if by_name.insert(layer.name().clone(), layer).is_some() {
                return Err(LayerError::DuplicateLayer);
            }
        }

        for (_, values) in &row_attrs {
            if values.len() != shape.0 {
                return Err(LayerError::ShapeMismatch {
                    expected: (shape.0, 1),
                    actual: (values.len(), 1),
                });
            }
        }
        for (_, values) in &col_attrs {
            if values.len() != shape.1 {
                return Err(LayerError::ShapeMismatch {
                    expected: (1, shape.1),
                    actual: (1, values.len()),
                });
            }
        }

        Ok(Self {
            layers: by_name,
            row_attrs,
            col_attrs,
            shape,
        })
    }

    /// Shared shape of every layer in the view
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Number of layers in the view
    pub fn n_layers(&self) -> usize {
        self.layers.len()
    }

    /// Look up a layer by name
    pub fn layer(&self, name: &LayerName) -> Option<&DenseLayer> {
        self.layers.get(name)
    }

    /// Row attribute columns in insertion order
    pub fn row_attrs(&self) -> &[(String, AttrValues)] {
        &self.row_attrs
    }

    /// Column attribute columns in insertion order
    pub fn col_attrs(&self) -> &[(String, AttrValues)] {
        &self.col_attrs
    }

    fn default_layer(&self) -> Result<&DenseLayer> {
        self.layers
            .get(&LayerName::Default)
            .ok_or(LayerError::MissingDefaultLayer)
    }

    /// Read a sub-block of the default layer's matrix
    pub fn read(&self, slice: &BlockSlice) -> Result<Array2<f64>> {
        self.default_layer()?.read(slice)
    }

    /// Convert a selection of the default layer into sparse triplets
    pub fn to_sparse(&self, rows: &Selection, cols: &Selection) -> Result<SparseTriplets> {
        self.default_layer()?.to_sparse(rows, cols)
    }

    /// Render a bounded text table of the view
    ///
    /// Shows the column attributes as header rows, the row attributes as
    /// leading columns, and the top-left `max_rows` x `max_cols` block
    /// of the default layer's matrix. A truncation marker is appended
    /// along each axis whose true extent exceeds the bound. Pure
    /// presentation; fails only if there is no default layer.
    pub fn preview(&self, max_rows: usize, max_cols: usize) -> Result<String> {
        const ELLIPSIS: &str = "\u{2026}";

        let matrix = self.default_layer()?;
        let (n_rows, n_cols) = self.shape;
        let shown_rows = n_rows.min(max_rows);
        let shown_cols = n_cols.min(max_cols);
        let rows_truncated = n_rows > shown_rows;
        let cols_truncated = n_cols > shown_cols;

        // Leading columns: one per row attribute, then a separator gap.
        let n_lead = self.row_attrs.len() + 1;
        let mut table: Vec<Vec<String>> = Vec::new();

        for (name, values) in &self.col_attrs {
            let mut line = vec![String::new(); self.row_attrs.len()];
            line.push(name.clone());
            for col in 0..shown_cols {
                line.push(values.render(col));
            }
            if cols_truncated {
                line.push(ELLIPSIS.to_string());
            }
            table.push(line);
        }

        // Row attribute names, aligned above their columns.
        let mut header: Vec<String> =
            self.row_attrs.iter().map(|(name, _)| name.clone()).collect();
        header.push(String::new());
        header.extend(std::iter::repeat(String::new()).take(shown_cols));
        if cols_truncated {
            header.push(ELLIPSIS.to_string());
        }
        table.push(header);

        for row in 0..shown_rows {
            let mut line: Vec<String> = self
                .row_attrs
                .iter()
                .map(|(_, values)| values.render(row))
                .collect();
            line.push(String::new());
            for col in 0..shown_cols {
                line.push(matrix.view()[[row, col]].to_string());
            }
            if cols_truncated {
                line.push(ELLIPSIS.to_string());
            }
            table.push(line);
        }

        if rows_truncated {
            let width = n_lead + shown_cols + usize::from(cols_truncated);
            table.push(vec![ELLIPSIS.to_string(); width]);
        }

        let mut out = format!(
            "({} rows, {} cols, {} layers)\n",
            n_rows,
            n_cols,
            self.layers.len()
        );
        out.push_str(&render_aligned(&table));
        Ok(out)
    }
}

/// Right-align every column of a cell table and join with two spaces
fn render_aligned(table: &[Vec<String>]) -> String {
    let n_cols = table.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; n_cols];
    for line in table {
        for (i, cell) in line.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for line in table {
        let mut rendered = String::new();
        for (i, cell) in line.iter().enumerate() {
            if i > 0 {
                rendered.push_str("  ");
            }
            let pad = widths[i] - cell.chars().count();
            rendered.extend(std::iter::repeat(' ').take(pad));
            rendered.push_str(cell);
        }
        out.push_str(rendered.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn simple_view() -> LayerSetView {
        LayerSetView::new(
            vec![DenseLayer::new("", array![[1.0, 2.0], [3.0, 4.0]])],
            vec![(
                "gene".to_string(),
                AttrValues::Text(vec!["g0".into(), "g1".into()]),
            )],
            vec![("cell_id".to_string(), AttrValues::Numeric(vec![10.0, 11.0]))],
        )
        .unwrap()
    }

    #[test]
    fn test_shape_derived_from_layers() {
        let view = simple_view();
        assert_eq!(view.shape(), (2, 2));
        assert_eq!(view.n_layers(), 1);
    }

    #[test]
    fn test_inconsistent_layer_shapes_rejected() {
        let result = LayerSetView::new(
            vec![
                DenseLayer::new("", Array2::zeros((2, 2))),
                DenseLayer::new("extra", Array2::zeros((3, 2))),
            ],
            Vec::new(),
            Vec::new(),
        );
        assert!(matches!(
            result.err(),
            Some(LayerError::ShapeMismatch {
                expected: (2, 2),
                actual: (3, 2),
            })
        ));
    }

    #[test]
    fn test_duplicate_layer_names_rejected() {
        let result = LayerSetView::new(
            vec![
                DenseLayer::new("raw", Array2::zeros((2, 2))),
                DenseLayer::new("raw", Array2::zeros((2, 2))),
            ],
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(result.err(), Some(LayerError::DuplicateLayer));
    }

    #[test]
    fn test_attr_length_mismatch_rejected() {
        let result = LayerSetView::new(
            vec![DenseLayer::new("", Array2::zeros((2, 2)))],
            vec![(
                "gene".to_string(),
                AttrValues::Text(vec!["only-one".into()]),
            )],
            Vec::new(),
        );
        assert!(matches!(
            result.err(),
            Some(LayerError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_view_rejected() {
        let result = LayerSetView::new(Vec::new(), Vec::new(), Vec::new());
        assert_eq!(result.err(), Some(LayerError::MissingDefaultLayer));
    }

    #[test]
    fn test_read_requires_default_layer() {
        let view = LayerSetView::new(
            vec![DenseLayer::new("named-only", Array2::zeros((2, 2)))],
            Vec::new(),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(
            view.read(&BlockSlice::full()).err(),
            Some(LayerError::MissingDefaultLayer)
        );
    }

    #[test]
    fn test_preview_contains_attrs_and_values() {
        let view = simple_view();
        let preview = view.preview(10, 10).unwrap();
        assert!(preview.contains("(2 rows, 2 cols, 1 layers)"));
        assert!(preview.contains("cell_id"));
        assert!(preview.contains("gene"));
        assert!(preview.contains("g1"));
        assert!(preview.contains('4'));
        assert!(!preview.contains('\u{2026}'));
    }

    #[test]
    fn test_preview_truncation_markers() {
        let view = LayerSetView::new(
            vec![DenseLayer::new("", Array2::zeros((12, 3)))],
            Vec::new(),
            Vec::new(),
        )
        .unwrap();
        let preview = view.preview(10, 10).unwrap();
        // Rows exceed the bound, columns do not
        assert!(preview.contains('\u{2026}'));
        assert!(preview.lines().last().unwrap().contains('\u{2026}'));
    }
}
