use thiserror::Error;

/// Word count of the default machine configuration.
pub const MEMORY_WORDS: usize = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryError {
    #[error("address {address} out of bounds, must be [0, {size})")]
    OutOfBounds { address: usize, size: usize },
    #[error("program image of {image} words exceeds memory size {size}")]
    ImageTooLarge { image: usize, size: usize },
}

pub type Result<T> = std::result::Result<T, MemoryError>;

/// Flat store of N signed 32-bit words, zeroed at construction.
#[derive(Clone, Debug)]
pub struct Memory<const N: usize> {
    words: [i32; N],
}

impl<const N: usize> Default for Memory<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Memory<N> {
    pub fn new() -> Self {
        Self { words: [0; N] }
    }

    pub const fn size(&self) -> usize {
        N
    }

    pub fn load(&self, address: usize) -> Result<i32> {
        self.check(address)?;
        Ok(self.words[address])
    }

    pub fn store(&mut self, address: usize, word: i32) -> Result<()> {
        self.check(address)?;
        self.words[address] = word;
        Ok(())
    }

    /// Copies a program image into memory starting at address 0. Cells past
    /// the end of the image keep their current contents.
    pub fn load_image(&mut self, image: &[i32]) -> Result<()> {
        if image.len() > N {
            return Err(MemoryError::ImageTooLarge {
                image: image.len(),
                size: N,
            });
        }
        self.words[..image.len()].copy_from_slice(image);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.words = [0; N];
    }

    pub fn words(&self) -> &[i32] {
        &self.words
    }

    fn check(&self, address: usize) -> Result<()> {
        if address >= N {
            return Err(MemoryError::OutOfBounds { address, size: N });
        }
        Ok(())
    }
}
