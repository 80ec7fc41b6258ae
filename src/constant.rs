//! Wire constants: framing sentinels, message/command ids, and the named
//! enumerations attached to the `INPUT` attribute schema (§6 and §11).

use std::convert::TryFrom;

/// Marks the start of a node (32-bit LE on the wire).
pub const NODE_START: u32 = 0x0000_0000;
/// Marks the end of the current node (32-bit LE on the wire).
pub const NODE_END: u32 = 0xFFFF_FFFF;

/// Root node id during the handshake phase.
pub const MSG_TYPE_CONNECTING: u16 = 1;
/// Root node id once the session is subscribed and exchanging data.
pub const MSG_TYPE_FAHRPULT: u16 = 2;

/// Command node ids — children of the root node, selecting the message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Command {
    Hello = 0x0001,
    AckHello = 0x0002,
    NeededData = 0x0003,
    AckNeededData = 0x0004,
    DataFtd = 0x000A,
    DataOperation = 0x000B,
    DataProg = 0x000C,
    Input = 0x010A,
    /// Present in the original protocol's command enumeration but with no
    /// attribute schema or call site anywhere in the kept source. Recorded
    /// by name only; no behaviour is built on it.
    #[allow(dead_code)]
    Control = 0x010B,
    /// See [`Command::Control`].
    #[allow(dead_code)]
    Graphic = 0x010C,
}

impl TryFrom<u16> for Command {
    type Error = u16;

    fn try_from(v: u16) -> Result<Self, u16> {
        Ok(match v {
            0x0001 => Command::Hello,
            0x0002 => Command::AckHello,
            0x0003 => Command::NeededData,
            0x0004 => Command::AckNeededData,
            0x000A => Command::DataFtd,
            0x000B => Command::DataOperation,
            0x000C => Command::DataProg,
            0x010A => Command::Input,
            0x010B => Command::Control,
            0x010C => Command::Graphic,
            other => return Err(other),
        })
    }
}

/// Client type declared in HELLO (id 2).
pub const CLIENT_TYPE_ZUSI: u16 = 1;
pub const CLIENT_TYPE_FAHRPULT: u16 = 2;

/// Protocol version declared in HELLO (id 1).
pub const PROTOCOL_VERSION: u16 = 2;

/// `NEEDED_DATA` sub-node ids.
pub const GROUP_FS: u16 = 0xA;
pub const GROUP_BEDIENUNG: u16 = 0xB;
pub const GROUP_PROG: u16 = 0xC;

/// Sub-node id of one input/action record inside `DATA_OPERATION`/`INPUT`.
pub const ACTION_NODE_ID: u16 = 0x01;
/// Sub-node id of a combined-lever ("Kombischalter") record, skipped by
/// [`crate::message::InputOperationMessage`]'s iterator (§4.4.4, §9).
pub const KOMBISCHALTER_NODE_ID: u16 = 0x02;

/// Attribute ids under `HELLO` (command 0x0001).
pub mod hello {
    pub const PROTOKOLL_VERSION: u16 = 1;
    pub const CLIENT_TYP: u16 = 2;
    pub const CLIENT_ID: u16 = 3;
    pub const CLIENT_VERSION: u16 = 4;
}

/// Attribute ids under `ACK_HELLO` (command 0x0002).
pub mod hello_ack {
    pub const ZUSI_VERSION: u16 = 1;
    pub const ZUSI_VERBINDUNGSINFO: u16 = 2;
    pub const ZUSI_OK: u16 = 3;
}

/// Attribute id under `ACK_NEEDED_DATA` (command 0x0004).
pub mod need_data_ack {
    pub const ZUSI_OK: u16 = 1;
}

/// Attribute ids within a `NEEDED_DATA` subscription sub-node (0xA / 0xC).
pub mod need_data {
    pub const ID: u16 = 1;
}

/// Attribute ids of the `Sifa` composite sub-node (id 100) under `FS`.
pub mod sifa {
    pub const NODE_ID: u16 = 100;
    pub const BAUART: u16 = 1;
    pub const LEUCHTMELDER: u16 = 2;
    pub const HUPE: u16 = 3;
    pub const HAUPTSCHALTER: u16 = 4;
    pub const STOERSCHALTER: u16 = 5;
    pub const LUFTABSPERRHAHN: u16 = 6;
}

/// Attribute ids of the fuehrerstand-data ("FS") schema under `DATA_FTD`.
pub mod fs {
    pub const GESCHWINDIGKEIT: u16 = 1;
    pub const DRUCK_HAUPTLUFTLEITUNG: u16 = 2;
    pub const DRUCK_BREMSZYLINDER: u16 = 3;
    pub const DRUCK_HAUPTLUFTBEHAELTER: u16 = 4;
    pub const LUFTPRESSER_LAEUFT: u16 = 5;
    pub const ZUGKRAFT_GESAMT: u16 = 9;
    pub const OBERSTROM: u16 = 13;
    pub const FAHRLEITUNGSSPANNUNG: u16 = 14;
    pub const MOTORDREHZAHL: u16 = 15;
    pub const UHRZEIT_STUNDE: u16 = 16;
    pub const UHRZEIT_MINUTE: u16 = 17;
    pub const UHRZEIT_SEKUNDE: u16 = 18;
    pub const HAUPTSCHALTER: u16 = 19;
    pub const AFB_SOLL_GESCHWINDIGKEIT: u16 = 23;
    pub const GESAMTWEG: u16 = 25;
    pub const LM_SCHLEUDERN: u16 = 27;
    pub const UHRZEIT_DIGITAL: u16 = 35;
    pub const AFB_EIN_AUS: u16 = 54;
    pub const DATUM: u16 = 75;
    pub const STRECKENHOECHSTGESCHWINDIGKEIT: u16 = 77;
    pub const SIFA: u16 = super::sifa::NODE_ID;
}

/// Attribute ids under `DATA_PROG` (command 0x000C).
pub mod prog {
    pub const ZUGDATEI: u16 = 1;
    pub const ZUGNUMMER: u16 = 2;
    pub const SIM_START: u16 = 3;
    pub const BUCHFAHRPLAN_DATEI: u16 = 4;
}

/// Attribute ids of an action record (sub-node [`ACTION_NODE_ID`]) under
/// `DATA_OPERATION` / `INPUT`.
pub mod action {
    pub const TASTER: u16 = 1;
    pub const KOMMANDO: u16 = 2;
    pub const AKTION: u16 = 3;
    pub const POSITION: u16 = 4;
    pub const SPEZIAL: u16 = 5;
}

/// Named button-group ids carried by an action record's `Taster` attribute.
///
/// Supplemented from the original source's `namespace Taster` (§11); the
/// wire itself only ever carries a raw `u16`, so [`crate::client::ClientSession::send_input`]
/// takes a plain `u16` and these constants are offered purely as a naming
/// convenience, matching the original's `constexpr` table.
pub mod taster {
    pub const KEINE_TASTATURBEDIENUNG: u16 = 0;
    pub const FAHRSCHALTER: u16 = 1;
    pub const DYNAMISCHE_BREMSE: u16 = 2;
    pub const AFB: u16 = 3;
    pub const FUEHRERBREMSVENTIL: u16 = 4;
    pub const ZUSATZBREMSVENTIL: u16 = 5;
    pub const GANG: u16 = 6;
    pub const RICHTUNGSSCHALTER: u16 = 7;
    pub const STUFENSCHALTER: u16 = 8;
    pub const SANDER: u16 = 9;
    pub const TUEREN: u16 = 10;
    pub const LICHT: u16 = 11;
    pub const PFEIFE: u16 = 12;
    pub const GLOCKE: u16 = 13;
    pub const LUEFTER: u16 = 14;
    pub const ZUGSICHERUNG: u16 = 15;
    pub const SIFA: u16 = 16;
    pub const HAUPTSCHALTER: u16 = 17;
    pub const GRUPPENSCHALTER: u16 = 18;
    pub const SCHLEUDERSCHUTZ: u16 = 19;
    pub const MG_BREMSE: u16 = 20;
    pub const LOKBREMSE_ENTLUEFTEN: u16 = 21;
    pub const INDIVIDUELL01: u16 = 22;
    pub const INDIVIDUELL02: u16 = 23;
    pub const INDIVIDUELL03: u16 = 24;
    pub const INDIVIDUELL04: u16 = 25;
    pub const INDIVIDUELL05: u16 = 26;
    pub const INDIVIDUELL06: u16 = 27;
    pub const INDIVIDUELL07: u16 = 28;
    pub const INDIVIDUELL08: u16 = 29;
    pub const INDIVIDUELL09: u16 = 30;
    pub const INDIVIDUELL10: u16 = 31;
    pub const INDIVIDUELL11: u16 = 32;
    pub const INDIVIDUELL12: u16 = 33;
    pub const INDIVIDUELL13: u16 = 34;
    pub const INDIVIDUELL14: u16 = 35;
    pub const INDIVIDUELL15: u16 = 36;
    pub const INDIVIDUELL16: u16 = 37;
    pub const INDIVIDUELL17: u16 = 38;
    pub const INDIVIDUELL18: u16 = 39;
    pub const INDIVIDUELL19: u16 = 40;
    pub const INDIVIDUELL20: u16 = 41;
    pub const PROGRAMMSTEUERUNG: u16 = 42;
    pub const STROMABNEHMER: u16 = 43;
    pub const FUEHRERSTANDSSICHT: u16 = 44;
    pub const LUFTPRESSER_AUS: u16 = 45;
    pub const ZUGFUNK: u16 = 46;
    pub const LZB: u16 = 47;
    pub const INDIVIDUELL21: u16 = 48;
    pub const INDIVIDUELL22: u16 = 49;
    pub const INDIVIDUELL23: u16 = 50;
    pub const INDIVIDUELL24: u16 = 51;
    pub const INDIVIDUELL25: u16 = 52;
    pub const INDIVIDUELL26: u16 = 53;
    pub const INDIVIDUELL27: u16 = 54;
    pub const INDIVIDUELL28: u16 = 55;
    pub const INDIVIDUELL29: u16 = 56;
    pub const INDIVIDUELL30: u16 = 57;
    pub const INDIVIDUELL31: u16 = 58;
    pub const INDIVIDUELL32: u16 = 59;
    pub const INDIVIDUELL33: u16 = 60;
    pub const INDIVIDUELL34: u16 = 61;
    pub const INDIVIDUELL35: u16 = 62;
    pub const INDIVIDUELL36: u16 = 63;
    pub const INDIVIDUELL37: u16 = 64;
    pub const INDIVIDUELL38: u16 = 65;
    pub const INDIVIDUELL39: u16 = 66;
    pub const INDIVIDUELL40: u16 = 67;
    pub const NOTAUS: u16 = 68;
    pub const FEDERSPEICHERBREMSE: u16 = 69;
    pub const BATTERIE_HAUPTSCHALTER_AUS: u16 = 70;
    pub const NBUE: u16 = 71;
    pub const BREMSPROBEFUNKTION: u16 = 72;
    pub const LEISTUNG_AUS: u16 = 73;
}

/// Named command ids carried by an action record's `Kommando` attribute.
pub mod kommando {
    pub const UNBESTIMMT: u16 = 0;
    pub const FAHRSCHALTER_AUF_DOWN: u16 = 1;
    pub const FAHRSCHALTER_AUF_UP: u16 = 2;
    pub const FAHRSCHALTER_AB_DOWN: u16 = 3;
    pub const FAHRSCHALTER_AB_UP: u16 = 4;
    pub const SIFA_DOWN: u16 = 0x39;
    pub const SIFA_UP: u16 = 0x3A;
    pub const PFEIFE_DOWN: u16 = 0x45;
    pub const PFEIFE_UP: u16 = 0x46;
}

/// Named action kinds carried by an action record's `Aktion` attribute.
pub mod aktion {
    pub const DEFAULT: u16 = 0;
    pub const DOWN: u16 = 1;
    pub const UP: u16 = 2;
    pub const AUF_DOWN: u16 = 3;
    pub const AUF_UP: u16 = 4;
    pub const AB_DOWN: u16 = 5;
    pub const AB_UP: u16 = 6;
    pub const ABSOLUT: u16 = 7;
    pub const ABSOLUT_1000ER: u16 = 8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_round_trips() {
        assert_eq!(Command::try_from(0x0001), Ok(Command::Hello));
        assert_eq!(Command::try_from(0x000A), Ok(Command::DataFtd));
        assert_eq!(Command::try_from(0x010B), Ok(Command::Control));
        assert_eq!(Command::try_from(0x9999), Err(0x9999));
    }
}
