pub mod classic;
pub mod guitar;
pub mod motion_plus;
pub mod nunchuck;
pub mod pro_controller;

use classic::ClassicControllerData;
use guitar::GuitarData;
use motion_plus::{MotionPlusData, MotionPlusMode};
use nunchuck::NunchuckData;
use pro_controller::ProControllerData;

/// Control register receiving the first initialization byte of an extension.
pub const EXTENSION_INIT_REGISTER: u32 = 0xA4_00F0;
/// Control register receiving the second initialization byte of an extension.
pub const EXTENSION_INIT_2_REGISTER: u32 = 0xA4_00FB;
/// The last six bytes of the extension register block identify the connected extension.
pub const EXTENSION_IDENTIFIER_REGISTER: u32 = 0xA4_00FA;

/// The kind of extension connected to the Wii remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtensionKind {
    #[default]
    None,
    Nunchuck,
    /// Classic Controller and Classic Controller Pro.
    ClassicController,
    /// Wii U Pro Controller.
    ProController,
    MotionPlus,
    MotionPlusNunchuck,
    MotionPlusClassic,
    Guitar,
}

impl ExtensionKind {
    /// Classifies the identifier read from `0xA400FA`.
    ///
    /// Bytes 0 and 1 vary between revisions of the same extension and are ignored.
    #[must_use]
    pub fn identify(identifier: &[u8]) -> Self {
        // https://www.wiibrew.org/wiki/Wiimote/Extension_Controllers#Identification
        match *identifier {
            [_, _, 0xA4, 0x20, 0x00, 0x00] => Self::Nunchuck,
            [_, _, 0xA4, 0x20, 0x01, 0x01] => Self::ClassicController,
            [_, _, 0xA4, 0x20, 0x01, 0x20] => Self::ProController,
            [_, _, 0xA4, 0x20, 0x01, 0x03] => Self::Guitar,
            [_, _, 0xA4, 0x20, 0x04, 0x05] => Self::MotionPlus,
            [_, _, 0xA4, 0x20, 0x05, 0x05] => Self::MotionPlusNunchuck,
            [_, _, 0xA4, 0x20, 0x07, 0x05] => Self::MotionPlusClassic,
            _ => Self::None,
        }
    }

    /// The MotionPlus mode reporting this kind, if it is served by the MotionPlus decoder.
    #[must_use]
    pub const fn motion_plus_mode(self) -> Option<MotionPlusMode> {
        match self {
            Self::MotionPlus => Some(MotionPlusMode::Active),
            Self::MotionPlusNunchuck => Some(MotionPlusMode::NunchuckPassthrough),
            Self::MotionPlusClassic => Some(MotionPlusMode::ClassicControllerPassthrough),
            _ => None,
        }
    }
}

/// The decoder of the active extension.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Extension {
    #[default]
    None,
    Nunchuck(NunchuckData),
    ClassicController(ClassicControllerData),
    ProController(ProControllerData),
    Guitar(GuitarData),
    MotionPlus(MotionPlusData),
}

impl Extension {
    #[must_use]
    pub fn new(kind: ExtensionKind) -> Self {
        match kind {
            ExtensionKind::None => Self::None,
            ExtensionKind::Nunchuck => Self::Nunchuck(NunchuckData::default()),
            ExtensionKind::ClassicController => {
                Self::ClassicController(ClassicControllerData::default())
            }
            ExtensionKind::ProController => Self::ProController(ProControllerData::default()),
            ExtensionKind::Guitar => Self::Guitar(GuitarData::default()),
            ExtensionKind::MotionPlus
            | ExtensionKind::MotionPlusNunchuck
            | ExtensionKind::MotionPlusClassic => Self::MotionPlus(MotionPlusData::new(
                kind.motion_plus_mode().unwrap_or(MotionPlusMode::Active),
            )),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ExtensionKind {
        match self {
            Self::None => ExtensionKind::None,
            Self::Nunchuck(_) => ExtensionKind::Nunchuck,
            Self::ClassicController(_) => ExtensionKind::ClassicController,
            Self::ProController(_) => ExtensionKind::ProController,
            Self::Guitar(_) => ExtensionKind::Guitar,
            Self::MotionPlus(motion_plus) => match motion_plus.mode() {
                MotionPlusMode::NunchuckPassthrough => ExtensionKind::MotionPlusNunchuck,
                MotionPlusMode::ClassicControllerPassthrough => ExtensionKind::MotionPlusClassic,
                MotionPlusMode::Active | MotionPlusMode::Inactive => ExtensionKind::MotionPlus,
            },
        }
    }

    /// Switches to the decoder serving `kind`.
    ///
    /// The decoder and its state are kept if it already serves `kind`, so MotionPlus zero values
    /// survive a change of pass-through mode. Returns whether the decoder was replaced.
    pub fn switch_to(&mut self, kind: ExtensionKind) -> bool {
        if let (Self::MotionPlus(motion_plus), Some(mode)) = (&mut *self, kind.motion_plus_mode()) {
            motion_plus.set_mode(mode);
            return false;
        }
        if self.kind() == kind {
            return false;
        }
        *self = Self::new(kind);
        true
    }

    /// Decodes the extension bytes of a data report. Returns false without an extension.
    pub fn interpret(&mut self, data: &[u8]) -> bool {
        match self {
            Self::None => false,
            Self::Nunchuck(nunchuck) => nunchuck.interpret(data),
            Self::ClassicController(classic) => classic.interpret(data),
            Self::ProController(pro) => pro.interpret(data),
            Self::Guitar(guitar) => guitar.interpret(data),
            Self::MotionPlus(motion_plus) => motion_plus.interpret(data),
        }
    }

    #[must_use]
    pub const fn motion_plus(&self) -> Option<&MotionPlusData> {
        match self {
            Self::MotionPlus(motion_plus) => Some(motion_plus),
            _ => None,
        }
    }

    pub fn motion_plus_mut(&mut self) -> Option<&mut MotionPlusData> {
        match self {
            Self::MotionPlus(motion_plus) => Some(motion_plus),
            _ => None,
        }
    }
}
