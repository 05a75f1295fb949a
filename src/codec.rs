//! Persistence Codec
//!
//! Length-prefixed binary layout of a branch store, host byte order, no
//! version tag:
//!
//! ```text
//! u64 branch_count   { u64 len, bytes }*
//! u64 metadata_count { u64 len, owner; u64 len, permissions; u64 len, timestamp; u64 size }*
//! u64 qubit_count    { f64 alpha, f64 beta, u8 measured, i32 value }*
//! ```
//!
//! Decoding treats the input as untrusted: each count and length is checked
//! against its bound before anything is allocated or read, and the result is
//! built in a fresh value so a failure never leaves partial state behind.

use crate::error::DecodeError;
use crate::qubit::{Qubit, UNMEASURED};
use crate::store::{BranchStore, MetadataRecord};

pub const MAX_BRANCHES: u64 = 10_000;
pub const MAX_BRANCH_LEN: u64 = 1_000_000;
pub const MAX_METADATA: u64 = 10_000;
pub const MAX_METADATA_FIELD_LEN: u64 = 1_000;
pub const MAX_QUBITS: u64 = 10_000;

/// Encode the persisted sections of `store`. Name and observed fields are
/// not written.
pub fn encode(store: &BranchStore) -> Vec<u8> {
    let mut out = WireWriter::default();

    out.put_u64(store.branches.len() as u64);
    for branch in &store.branches {
        out.put_str(branch);
    }

    out.put_u64(store.metadata.len() as u64);
    for meta in &store.metadata {
        out.put_str(&meta.owner);
        out.put_str(&meta.permissions);
        out.put_str(&meta.timestamp);
        out.put_u64(meta.size);
    }

    out.put_u64(store.qubits.len() as u64);
    for qubit in &store.qubits {
        out.put_f64(qubit.alpha);
        out.put_f64(qubit.beta);
        out.put_bool(qubit.measured);
        out.put_i32(qubit.value);
    }

    out.into_bytes()
}

/// Decode a store from `bytes`. The returned store has an empty name and
/// default observed fields. Bytes after the qubit section are ignored.
pub fn decode(bytes: &[u8]) -> Result<BranchStore, DecodeError> {
    let mut input = WireReader::new(bytes);
    let mut staged = BranchStore::default();

    let branch_count = input.read_count("branch", MAX_BRANCHES)?;
    staged.branches.reserve(branch_count);
    for _ in 0..branch_count {
        staged
            .branches
            .push(input.read_string("branch", MAX_BRANCH_LEN)?);
    }

    let metadata_count = input.read_count("metadata", MAX_METADATA)?;
    staged.metadata.reserve(metadata_count);
    for _ in 0..metadata_count {
        let owner = input.read_string("owner", MAX_METADATA_FIELD_LEN)?;
        let permissions = input.read_string("permissions", MAX_METADATA_FIELD_LEN)?;
        let timestamp = input.read_string("timestamp", MAX_METADATA_FIELD_LEN)?;
        let size = input.read_u64("size")?;
        staged.metadata.push(MetadataRecord {
            owner,
            permissions,
            timestamp,
            size,
        });
    }

    let qubit_count = input.read_count("qubit", MAX_QUBITS)?;
    staged.qubits.reserve(qubit_count);
    for index in 0..qubit_count {
        let alpha = input.read_f64("alpha")?;
        let beta = input.read_f64("beta")?;
        let measured = input.read_bool("measured")?;
        let value = input.read_i32("value")?;

        let consistent = match value {
            UNMEASURED => !measured,
            0 | 1 => measured,
            _ => false,
        };
        if !consistent {
            return Err(DecodeError::InvalidQubit { index, value });
        }

        staged.qubits.push(Qubit {
            alpha,
            beta,
            measured,
            value,
        });
    }

    Ok(staged)
}

#[derive(Default)]
struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    fn put_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_ne_bytes());
    }

    fn put_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_ne_bytes());
    }

    fn put_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_bits().to_ne_bytes());
    }

    fn put_bool(&mut self, v: bool) {
        self.buf.push(u8::from(v));
    }

    fn put_str(&mut self, s: &str) {
        self.put_u64(s.len() as u64);
        self.buf.extend_from_slice(s.as_bytes());
    }

    fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, needed: usize, field: &'static str) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(DecodeError::Truncated {
                field,
                needed,
                remaining,
            });
        }
        let slice = &self.buf[self.pos..self.pos + needed];
        self.pos += needed;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, field)?);
        Ok(out)
    }

    fn read_u64(&mut self, field: &'static str) -> Result<u64, DecodeError> {
        Ok(u64::from_ne_bytes(self.take_array(field)?))
    }

    fn read_i32(&mut self, field: &'static str) -> Result<i32, DecodeError> {
        Ok(i32::from_ne_bytes(self.take_array(field)?))
    }

    fn read_f64(&mut self, field: &'static str) -> Result<f64, DecodeError> {
        Ok(f64::from_bits(u64::from_ne_bytes(self.take_array(field)?)))
    }

    fn read_bool(&mut self, field: &'static str) -> Result<bool, DecodeError> {
        let [byte] = self.take_array::<1>(field)?;
        match byte {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodeError::InvalidBool { value }),
        }
    }

    fn read_count(&mut self, field: &'static str, limit: u64) -> Result<usize, DecodeError> {
        let count = self.read_u64(field)?;
        if count > limit {
            return Err(DecodeError::OversizedCount {
                field,
                count,
                limit,
            });
        }
        Ok(count as usize)
    }

    fn read_string(&mut self, field: &'static str, limit: u64) -> Result<String, DecodeError> {
        let length = self.read_u64(field)?;
        if length > limit {
            return Err(DecodeError::OversizedLength {
                field,
                length,
                limit,
            });
        }
        let bytes = self.take(length as usize, field)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { field })
    }
}
