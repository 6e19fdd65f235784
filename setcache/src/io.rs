use std::fs::File;
use std::ops::Deref;
use crate::error::TraceError;

/// The bytes of a trace file, memory mapped where possible
#[derive(Debug)]
pub enum TraceBytes {
    #[cfg(unix)]
    Mapped(memmap2::Mmap),
    Owned(Vec<u8>),
}

impl Deref for TraceBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            #[cfg(unix)]
            TraceBytes::Mapped(m) => &m[..],
            TraceBytes::Owned(v) => &v[..],
        }
    }
}

/// Loads a binary trace for [crate::simulator::Simulator::simulate]
pub fn get_trace(file: File) -> Result<TraceBytes, TraceError> {
    // Empty files can't be mapped
    if file.metadata()?.len() == 0 {
        return Ok(TraceBytes::Owned(Vec::new()));
    }
    // Compatibility on other systems
    #[cfg(not(unix))]
    {
        use std::io::Read;
        let mut file = file;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        Ok(TraceBytes::Owned(buf))
    }
    // Memory map the file on unix systems, the simulator only ever reads it front to back
    #[cfg(unix)]
    {
        use memmap2::{Advice, Mmap};
        // Safety: the map is read only and lives no longer than the simulation reading it
        let m = unsafe { Mmap::map(&file)? };
        m.advise(Advice::Sequential)?;
        Ok(TraceBytes::Mapped(m))
    }
}
