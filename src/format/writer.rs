use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::format::loader::{LayoutPolicy, ModelWeights};
use crate::format::MAGIC;
use crate::math::tensor::Tensor;

/// Serializes `weights` in the layout [`ModelLoader`](crate::format::ModelLoader)
/// reads, always with two dims per record. Each tensor's payload is written
/// in the orientation `policy` resolves for its shape, so loading with the
/// same policy reproduces the tensors exactly.
pub fn write_model<W: Write>(weights: &ModelWeights, policy: LayoutPolicy, mut w: W) -> Result<()> {
    w.write_all(&MAGIC.to_le_bytes())?;
    for (weight, bias) in [(&weights.fc1w, &weights.fc1b), (&weights.fc2w, &weights.fc2b)] {
        w.write_all(&2i32.to_le_bytes())?;
        write_record(&mut w, weight, policy)?;
        write_record(&mut w, bias, policy)?;
    }
    w.flush()?;
    Ok(())
}

/// Writes `weights` to `path`, replacing any existing file.
pub fn save_model(weights: &ModelWeights, policy: LayoutPolicy, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path)?;
    write_model(weights, policy, BufWriter::new(file))
}

fn write_record<W: Write>(w: &mut W, t: &Tensor, policy: LayoutPolicy) -> Result<()> {
    for dim in [t.rows(), t.cols()] {
        let dim = u32::try_from(dim).map_err(|_| Error::DimTooLarge {
            record: t.name().to_owned(),
            dim,
        })?;
        w.write_all(&dim.to_le_bytes())?;
    }
    for x in t.to_layout(policy.resolve(t.rows(), t.cols())) {
        w.write_all(&x.to_le_bytes())?;
    }
    Ok(())
}
