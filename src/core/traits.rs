use ndarray::*;

/// Objects that can be written as a row of a result table
pub trait SaveData {
    /// Tab separated column names, units included
    fn get_headers(&self) -> String;
    fn num_storable_variables(&self) -> usize;
    /// Row in report units, same order as `get_headers`
    fn get_storable_data(&self) -> Array1<f64>;
}

/// Stacks the rows of `data` into a table. Returns `None` for an empty slice.
pub fn storable_table<T: SaveData>(data: &[T]) -> Result<Option<Array2<f64>>, ShapeError> {
    let first = match data.first() {
        Some(d) => d,
        None => return Ok(None),
    };
    let cols = first.num_storable_variables();
    let mut values: Vec<f64> = Vec::with_capacity(cols * data.len());
    for d in data.iter() {
        values.extend(d.get_storable_data().iter());
    }
    let table = Array2::from_shape_vec((data.len(), cols), values)?;
    Ok(Some(table))
}
