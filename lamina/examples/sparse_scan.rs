//! Open a disk-backed layer, edit it, and materialize it as triplets

use lamina::testing::MemStore;
use lamina::{
    Axis, AxisSlice, BlockSlice, DataType, DiskLayer, Layer, ResizeSpec, Selection,
};
use ndarray::array;

fn main() -> lamina::Result<()> {
    let matrix = array![
        [0.0, 1.0, 0.0],
        [2.0, 0.0, 3.0],
        [0.0, 0.0, 0.0],
        [4.0, 5.0, 0.0],
    ];

    let store = MemStore::new(matrix, (8, 3))?
        .with_batch_width(2)
        .into_handle();
    let mut layer = DiskLayer::open(store, "", DataType::I32)?;
    println!("opened default layer, shape {:?}", layer.shape());

    // Overwrite one row; values are cast into the declared i32 range
    layer.write(
        &BlockSlice::new(AxisSlice::Index(2), AxisSlice::Full),
        array![[7.0, 0.0, 8.0]].view(),
    )?;

    // Grow the row axis; new rows start out zero
    layer.resize(ResizeSpec::PerAxis {
        axis: Axis::Rows,
        extent: 6,
    })?;
    println!("resized to {:?}", layer.shape());

    let sparse = layer.to_sparse(&Selection::All, &Selection::All)?;
    println!(
        "materialized {} nonzeros out of {} cells:",
        sparse.nnz(),
        sparse.shape().0 * sparse.shape().1
    );
    for (row, col, value) in sparse.iter() {
        println!("  ({row}, {col}) = {value}");
    }

    Ok(())
}
