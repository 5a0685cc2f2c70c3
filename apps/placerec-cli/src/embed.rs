//! Deterministic stand-in for the external embedding model.
//!
//! Hashes whitespace tokens into a fixed-dimension vector and L2-normalizes
//! it, so identical keywords always land on identical vectors. Good enough
//! for seeding demo data and exercising the pipeline offline; the real
//! service sits behind the same [`Embedder`] trait.

use placerec_core::traits::Embedder;

pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        use std::hash::{Hash, Hasher};
        use twox_hash::XxHash64;

        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            let mut v = vec![0f32; self.dim];
            for (i, token) in text.split_whitespace().enumerate() {
                let mut hasher = XxHash64::with_seed(0);
                token.hash(&mut hasher);
                let h = hasher.finish();
                let idx = (h as usize) % self.dim;
                let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
                v[idx] += val + (i as f32 % 3.0) * 0.01;
            }
            let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt().max(1e-6);
            for x in &mut v {
                *x /= norm;
            }
            out.push(v);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_same_vector() {
        let embedder = HashEmbedder::new(64);
        let a = embedder.embed_batch(&["quiet cafe".to_string()]).unwrap();
        let b = embedder.embed_batch(&["quiet cafe".to_string()]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn vectors_are_unit_length() {
        let embedder = HashEmbedder::new(64);
        let v = &embedder.embed_batch(&["grilled lamb skewers".to_string()]).unwrap()[0];
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>();
        assert!((norm - 1.0).abs() < 1e-4);
    }
}
