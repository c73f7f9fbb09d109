use num::Num;
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::SparseVec;

impl<N> Serialize for SparseVec<N>
where
    N: Num + Copy + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // len, nnz, then the ordered (index, value) entries
        let mut state = serializer.serialize_struct("SparseVec", 3)?;
        state.serialize_field("len", &(self.len() as u64))?;
        state.serialize_field("nnz", &(self.nnz() as u64))?;
        let entries: Vec<(u64, N)> = self
            .raw_iter()
            .map(|(idx, val)| (idx as u64, *val))
            .collect();
        state.serialize_field("entries", &entries)?;
        state.end()
    }
}

impl<'de, N> Deserialize<'de> for SparseVec<N>
where
    N: Num + Copy + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct SparseVecData<N> {
            len: u64,
            nnz: u64,
            entries: Vec<(u64, N)>,
        }

        let data = SparseVecData::<N>::deserialize(deserializer)?;
        if data.nnz as usize != data.entries.len() {
            return Err(D::Error::custom(format!(
                "nnz {} does not match {} entries",
                data.nnz,
                data.entries.len()
            )));
        }
        let len = data.len as usize;
        let mut prev: Option<usize> = None;
        let mut pairs = Vec::with_capacity(data.entries.len());
        for (idx, val) in data.entries {
            let idx = idx as usize;
            if idx >= len || prev.is_some_and(|p| p >= idx) {
                return Err(D::Error::custom(format!(
                    "entry index {} is out of order or outside dimension {}",
                    idx, len
                )));
            }
            prev = Some(idx);
            pairs.push((idx, val));
        }
        Ok(SparseVec::from_pairs(len, pairs))
    }
}
