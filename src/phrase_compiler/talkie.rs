/// talkie.rs
/// Bit packing of LPC analysis frames into the format the Talkie playback
/// routine reads.
///
/// Each frame is written most significant bit first:
///
/// ```text
/// energy (4) | repeat (1) | pitch (6) | K1 (5) K2 (5) K3 (4) K4 (4) | K5..K7 (4) K8..K10 (3)
/// ```
///
/// - energy 0 is a silent frame and carries no further fields
/// - a repeat frame reuses the previous K parameters, so stops after pitch
/// - an unvoiced frame (pitch 0) stops after K4
///
/// The word ends with a stop frame (energy 15). Talkie reads bytes LSB first,
/// so every packed byte is bit-reversed before it leaves the packer.
use bitvec::prelude::*;

pub const ENERGY_SILENT: u8 = 0;
pub const ENERGY_STOP: u8 = 15;

const ENERGY_BITS: usize = 4;
const REPEAT_BITS: usize = 1;
const PITCH_BITS: usize = 6;
const K_BITS: [usize; 10] = [5, 5, 4, 4, 4, 4, 4, 3, 3, 3];
const UNVOICED_K_COUNT: usize = 4;

/// One quantized analysis frame, all fields are table indices
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LpcFrame {
    pub energy: u8,
    pub repeat: bool,
    pub pitch: u8,
    pub k: [u8; 10],
    /// The analyzer's trailing frame; it is dropped in favour of the stop frame
    pub last: bool,
}

impl LpcFrame {
    pub fn silent() -> Self {
        LpcFrame::default()
    }

    pub fn voiced(energy: u8, pitch: u8, k: [u8; 10]) -> Self {
        LpcFrame {
            energy,
            pitch,
            k,
            ..Default::default()
        }
    }

    pub fn unvoiced(energy: u8, k: [u8; 4]) -> Self {
        let mut all = [0u8; 10];
        all[..4].copy_from_slice(&k);
        LpcFrame {
            energy,
            k: all,
            ..Default::default()
        }
    }

    pub fn repeated(energy: u8, pitch: u8) -> Self {
        LpcFrame {
            energy,
            repeat: true,
            pitch,
            ..Default::default()
        }
    }

    fn write(&self, bits: &mut BitVec<u8, Msb0>) -> Result<(), String> {
        if self.energy == ENERGY_STOP {
            return Err("energy 15 is reserved for the stop frame".to_string());
        }
        push_field(bits, "energy", self.energy, ENERGY_BITS)?;
        if self.energy == ENERGY_SILENT {
            return Ok(());
        }

        push_field(bits, "repeat", self.repeat as u8, REPEAT_BITS)?;
        push_field(bits, "pitch", self.pitch, PITCH_BITS)?;
        if self.repeat {
            return Ok(());
        }

        let k_count = if self.pitch == 0 {
            UNVOICED_K_COUNT
        } else {
            K_BITS.len()
        };
        for (i, width) in K_BITS.iter().enumerate().take(k_count) {
            push_field(bits, "k", self.k[i], *width)?;
        }
        Ok(())
    }
}

fn push_field(
    bits: &mut BitVec<u8, Msb0>,
    name: &str,
    value: u8,
    width: usize,
) -> Result<(), String> {
    if (value as usize) >> width != 0 {
        return Err(format!(
            "{} value {} does not fit in {} bits",
            name, value, width
        ));
    }
    for shift in (0..width).rev() {
        bits.push((value >> shift) & 1 == 1);
    }
    Ok(())
}

/// Pack frames into a self-terminating word blob
pub fn pack_frames(frames: &[LpcFrame]) -> Result<Vec<u8>, String> {
    let mut bits: BitVec<u8, Msb0> = BitVec::new();
    for frame in frames.iter().filter(|f| !f.last) {
        frame.write(&mut bits)?;
    }
    push_field(&mut bits, "energy", ENERGY_STOP, ENERGY_BITS)?;

    while bits.len() % 8 != 0 {
        bits.push(false);
    }

    Ok(bits.into_vec().into_iter().map(u8::reverse_bits).collect())
}
