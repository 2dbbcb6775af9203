//! Train/test splitting.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};

/// Split a frame into `(train, test)` by shuffling row indices and
/// carving off `test_fraction` of the rows. With a seed the split is
/// reproducible; without one it draws from the thread-local generator.
/// Both partitions keep at least one row.
pub fn train_test_split(
    data: &DataFrame,
    test_fraction: f64,
    seed: Option<u64>,
) -> Result<(DataFrame, DataFrame)> {
    if !(0.0 < test_fraction && test_fraction < 1.0) {
        return Err(Error::InvalidInput(format!(
            "test fraction must be in (0, 1), got {}",
            test_fraction
        )));
    }
    let nrows = data.nrows();
    if nrows < 2 {
        return Err(Error::EmptyData(format!(
            "need at least 2 rows to split, got {}",
            nrows
        )));
    }

    let mut indices: Vec<usize> = (0..nrows).collect();
    match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            indices.shuffle(&mut rng);
        }
        None => {
            let mut rng = rand::rng();
            indices.shuffle(&mut rng);
        }
    }

    let n_test = ((nrows as f64) * test_fraction).round() as usize;
    let n_test = n_test.clamp(1, nrows - 1);
    let test = data.take_rows(&indices[..n_test])?;
    let train = data.take_rows(&indices[n_test..])?;
    debug!(
        "split {} rows into {} train / {} test",
        nrows,
        train.nrows(),
        test.nrows()
    );
    Ok((train, test))
}
