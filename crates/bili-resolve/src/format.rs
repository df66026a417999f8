use crate::settings::Settings;

/// `fnval` capability bits understood by the play-address endpoint.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[repr(u32)]
pub enum FormatFlag {
    Dash = 16,
    Hdr = 64,
    FourK = 128,
    DolbyAudio = 256,
    DolbyVision = 512,
    EightK = 1024,
    Av1 = 2048,
}

impl FormatFlag {
    pub const fn bit(self) -> u32 {
        self as u32
    }
}

/// Builds the `fnval` mask for a play-address lookup.
///
/// DASH, AV1, 4K and 8K are always requested; HDR and the Dolby pair are
/// opt-in through settings. The service treats unavailable bits as hints,
/// so over-asking is harmless.
pub fn format_mask(settings: &Settings) -> u32 {
    let mut mask = FormatFlag::Dash.bit()
        | FormatFlag::Av1.bit()
        | FormatFlag::FourK.bit()
        | FormatFlag::EightK.bit();
    if settings.hdr {
        mask |= FormatFlag::Hdr.bit();
    }
    if settings.dolby {
        mask |= FormatFlag::DolbyAudio.bit() | FormatFlag::DolbyVision.bit();
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mask() {
        assert_eq!(format_mask(&Settings::default()), 3232);
    }

    #[test]
    fn test_hdr_adds_its_bit() {
        let settings = Settings {
            hdr: true,
            ..Default::default()
        };
        assert_eq!(format_mask(&settings), 3296);
    }

    #[test]
    fn test_dolby_adds_both_bits() {
        let settings = Settings {
            dolby: true,
            ..Default::default()
        };
        assert_eq!(format_mask(&settings), 4000);
    }

    #[test]
    fn test_hdr_and_dolby() {
        let settings = Settings {
            hdr: true,
            dolby: true,
            ..Default::default()
        };
        assert_eq!(format_mask(&settings), 4064);
    }
}
