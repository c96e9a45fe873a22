use crate::graphics::{Graphics, Quad};

/// Quads sharing one texture, submitted together.
pub struct Batch<T> {
    /// Texture every quad samples from.
    pub texture: T,
    quads: Vec<Quad>,
}

impl<T> Batch<T> {
    /// An empty batch bound to `texture`.
    pub fn new(texture: T) -> Self {
        Self {
            texture,
            quads: Vec::new(),
        }
    }

    /// Quads appended since the last clear.
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }
}

/// One batch per distinct tileset image, indexed by batch index.
pub struct BatchManager<T> {
    batches: Vec<Batch<T>>,
}

impl<T> BatchManager<T> {
    /// Batches are created once; their count never changes afterwards.
    pub fn new(textures: impl IntoIterator<Item = T>) -> Self {
        Self {
            batches: textures.into_iter().map(Batch::new).collect(),
        }
    }

    /// Drops last frame's geometry. Capacity is kept for the next frame.
    pub fn clear_all(&mut self) {
        for b in &mut self.batches {
            b.quads.clear();
        }
    }

    /// Queues one quad on batch `batch_index`.
    ///
    /// # Panics
    ///
    /// If `batch_index` does not name a batch.
    #[inline]
    pub fn append_tile(&mut self, batch_index: usize, quad: Quad) {
        let count = self.batches.len();
        match self.batches.get_mut(batch_index) {
            Some(b) => b.quads.push(quad),
            None => panic!("batch {batch_index} does not exist ({count} batches)"),
        }
    }

    /// Submits every batch, in batch-index order. Returns the number of draw calls.
    pub fn draw_all<G>(&self, target: &mut G) -> usize
    where
        G: Graphics<Texture = T> + ?Sized,
    {
        for b in &self.batches {
            target.draw_batch(&b.texture, &b.quads);
        }
        self.batches.len()
    }

    /// Number of batches.
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// True when no image was loaded.
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Batch at `batch_index`, if any.
    pub fn get(&self, batch_index: usize) -> Option<&Batch<T>> {
        self.batches.get(batch_index)
    }

    /// Quads queued on one batch, `0` for unknown indices.
    pub fn quad_count(&self, batch_index: usize) -> usize {
        self.batches.get(batch_index).map_or(0, |b| b.quads.len())
    }

    /// Quads queued across all batches.
    pub fn total_quads(&self) -> usize {
        self.batches.iter().map(|b| b.quads.len()).sum()
    }
}
