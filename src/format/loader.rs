use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::format::reader::RecordReader;
use crate::format::MAGIC;
use crate::math::layout::Layout;
use crate::math::tensor::Tensor;

/// How the loader decides the on-disk orientation of each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutPolicy {
    /// `Layout::infer(rows, cols)` per record; what existing files expect.
    #[default]
    InferFromShape,
    /// Every record uses the same orientation regardless of shape.
    Fixed(Layout),
}

impl LayoutPolicy {
    pub fn resolve(self, rows: usize, cols: usize) -> Layout {
        match self {
            LayoutPolicy::InferFromShape => Layout::infer(rows, cols),
            LayoutPolicy::Fixed(layout) => layout,
        }
    }
}

/// Options for [`ModelLoader`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub layout: LayoutPolicy,
}

/// The four tensors of the two-layer model, normalized to row-major.
#[derive(Debug, Clone)]
pub struct ModelWeights {
    pub fc1w: Tensor,
    pub fc1b: Tensor,
    pub fc2w: Tensor,
    pub fc2b: Tensor,
}

/// Reads the binary model layout:
///
/// ```text
/// u32  magic = 0x67676d6c
/// i32  n_dims (layer 1)
/// record fc1w, record fc1b        (both use layer 1's n_dims)
/// i32  n_dims (layer 2)
/// record fc2w, record fc2b        (both use layer 2's n_dims)
///
/// record := n_dims x u32 dims (missing dims are 1), then rows*cols x f32
/// ```
///
/// All integers and floats are little-endian.
pub struct ModelLoader {
    options: LoadOptions,
}

impl ModelLoader {
    pub fn new(options: LoadOptions) -> ModelLoader {
        ModelLoader { options }
    }

    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<ModelWeights> {
        let path = path.as_ref();
        info!("loading model from '{}'", path.display());
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        self.load_reader(BufReader::new(file))
    }

    pub fn load_reader<R: Read>(&self, reader: R) -> Result<ModelWeights> {
        let mut r = RecordReader::new(reader);

        let magic = r.read_u32("magic")?;
        if magic != MAGIC {
            return Err(Error::BadMagic {
                expected: MAGIC,
                found: magic,
            });
        }

        let n_dims = read_n_dims(&mut r, "fc1 n_dims")?;
        let fc1w = self.load_record(&mut r, n_dims, "fc1w")?;
        let fc1b = self.load_record(&mut r, n_dims, "fc1b")?;

        let n_dims = read_n_dims(&mut r, "fc2 n_dims")?;
        let fc2w = self.load_record(&mut r, n_dims, "fc2w")?;
        let fc2b = self.load_record(&mut r, n_dims, "fc2b")?;

        let trailing = r.remaining()?;
        if trailing > 0 {
            debug!("ignoring {} trailing bytes after fc2b", trailing);
        }
        info!(
            "model loaded: fc1 {:?} -> fc2 {:?} ({} bytes)",
            fc1w.shape(),
            fc2w.shape(),
            r.consumed()
        );

        Ok(ModelWeights { fc1w, fc1b, fc2w, fc2b })
    }

    fn load_record<R: Read>(
        &self,
        r: &mut RecordReader<R>,
        n_dims: usize,
        name: &str,
    ) -> Result<Tensor> {
        let mut d = [1usize; 2];
        for dim in d.iter_mut().take(n_dims) {
            *dim = r.read_u32(name)? as usize;
        }
        let [rows, cols] = d;
        let count = rows.checked_mul(cols).ok_or_else(|| Error::TruncatedFile {
            record: name.to_owned(),
            expected: usize::MAX,
            got: 0,
        })?;
        let buf = r.read_f32s(count, name)?;
        let layout = self.options.layout.resolve(rows, cols);
        debug!("record {}: {}x{} as {:?}", name, rows, cols, layout);
        Ok(Tensor::with_layout(rows, cols, &buf, layout)?.named(name))
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        ModelLoader::new(LoadOptions::default())
    }
}

/// Loads a model file with default options.
pub fn load_model(path: impl AsRef<Path>) -> Result<ModelWeights> {
    ModelLoader::default().load_path(path)
}

fn read_n_dims<R: Read>(r: &mut RecordReader<R>, what: &str) -> Result<usize> {
    let n_dims = r.read_i32(what)?;
    match n_dims {
        1 | 2 => Ok(n_dims as usize),
        other => Err(Error::InvalidDims(other)),
    }
}
