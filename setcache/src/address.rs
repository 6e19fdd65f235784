/// The width of every address in a trace
pub type Address = u32;

/// Splits addresses into a tag and a set index
///
/// The block size and the number of sets are assumed to be powers of two, this is checked once
/// when the controller is built rather than on every access. Shifts wider than the address yield
/// zero, so decoding is total for any geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressDecoder {
    offset_bits: u32,
    index_bits: u32,
    index_mask: Address,
}

impl AddressDecoder {
    pub fn new(block_size: u64, num_sets: u64) -> Self {
        debug_assert!(block_size.is_power_of_two() && num_sets.is_power_of_two());
        let offset_bits = block_size.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        let index_mask = if index_bits >= Address::BITS {
            Address::MAX
        } else {
            (1 << index_bits) - 1
        };
        Self {
            offset_bits,
            index_bits,
            index_mask,
        }
    }

    /// Converts an address into its tag and the index of the set it maps to
    ///
    /// # Arguments
    ///
    /// * `address`: The byte address of the access
    ///
    /// returns: (Address, usize)
    ///
    /// # Examples
    ///
    /// ```
    /// use setcache::address::AddressDecoder;
    /// // 16 byte blocks, 4 sets: 4 offset bits, 2 index bits
    /// let decoder = AddressDecoder::new(16, 4);
    /// assert_eq!(decoder.decode(0x1234), (0x48, 3));
    /// ```
    pub fn decode(&self, address: Address) -> (Address, usize) {
        let tag = address
            .checked_shr(self.offset_bits + self.index_bits)
            .unwrap_or(0);
        let index = address.checked_shr(self.offset_bits).unwrap_or(0) & self.index_mask;
        (tag, index as usize)
    }

    pub fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    pub fn index_bits(&self) -> u32 {
        self.index_bits
    }
}
