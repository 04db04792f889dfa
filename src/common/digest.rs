//! Content identity (size and MD5 checksum) of files on disk.

use std::{io::Read, path::Path};

use md5::{Digest, Md5};

use crate::err::Error;

/// Size of the chunks that files are streamed through the hasher in.
const BUF_LEN: usize = 1024 * 1024;

/// Size and checksum of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDigest {
    /// File size in bytes, as reported by the file system.
    pub size: u64,
    /// Lower-case hexadecimal MD5 checksum.
    pub md5: String,
}

/// Compute size and MD5 checksum for the file at `path`.
pub fn digest<P>(path: P) -> Result<ContentDigest, Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let size = std::fs::metadata(path)
        .map_err(|e| Error::io(path, e))?
        .len();
    let md5 = md5sum(path)?;
    Ok(ContentDigest { size, md5 })
}

/// Compute MD5 sum for file at `path`, reading it in chunks of `BUF_LEN` bytes.
pub fn md5sum<P>(path: P) -> Result<String, Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    tracing::trace!("Computing MD5 checksum for {:?}", path);

    let mut file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = Md5::new();
    let mut buffer = vec![0u8; BUF_LEN];
    let mut bytes_read = 0usize;
    loop {
        let n = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::io(path, e)),
        };
        hasher.update(&buffer[..n]);
        bytes_read += n;
    }
    let checksum = base16ct::lower::encode_string(&hasher.finalize());

    tracing::trace!(" MD5 = {} ({} bytes read)", &checksum, bytes_read);
    Ok(checksum)
}
