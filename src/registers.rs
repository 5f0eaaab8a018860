//! The register bank: a fixed set of named integer slots.
//!
//! Register identifiers are a closed enumeration checked at translation time,
//! so reads and writes at run time cannot fail. Every register always holds a
//! defined value, zero after construction or [`Registers::clear`].

use crate::errors::TranslationError;
use std::fmt;
use std::str::FromStr;

/// Number of registers in the bank.
pub const REGISTER_COUNT: usize = 8;

/// Identifier of one machine register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Register {
    EAX,
    EBX,
    ECX,
    EDX,
    ESP,
    EBP,
    ESI,
    EDI,
}

impl Register {
    /// All registers, in bank order.
    pub const ALL: [Register; REGISTER_COUNT] = [
        Register::EAX,
        Register::EBX,
        Register::ECX,
        Register::EDX,
        Register::ESP,
        Register::EBP,
        Register::ESI,
        Register::EDI,
    ];

    /// Returns the register's assembly name.
    pub const fn name(self) -> &'static str {
        match self {
            Register::EAX => "EAX",
            Register::EBX => "EBX",
            Register::ECX => "ECX",
            Register::EDX => "EDX",
            Register::ESP => "ESP",
            Register::EBP => "EBP",
            Register::ESI => "ESI",
            Register::EDI => "EDI",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Register {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EAX" => Ok(Register::EAX),
            "EBX" => Ok(Register::EBX),
            "ECX" => Ok(Register::ECX),
            "EDX" => Ok(Register::EDX),
            "ESP" => Ok(Register::ESP),
            "EBP" => Ok(Register::EBP),
            "ESI" => Ok(Register::ESI),
            "EDI" => Ok(Register::EDI),
            _ => Err(TranslationError::ExpectedRegister {
                token: s.to_string(),
            }),
        }
    }
}

/// Fixed bank of registers, all initialized to zero.
///
/// Two banks are equal when every register holds the same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    values: [i64; REGISTER_COUNT],
}

impl Registers {
    /// Creates a bank with every register set to zero.
    pub fn new() -> Self {
        Self {
            values: [0; REGISTER_COUNT],
        }
    }

    /// Returns the current value of `register`.
    pub fn get(&self, register: Register) -> i64 {
        self.values[register.index()]
    }

    /// Overwrites the value of `register` unconditionally.
    pub fn set(&mut self, register: Register, value: i64) {
        self.values[register.index()] = value;
    }

    /// Resets every register to zero.
    pub fn clear(&mut self) {
        self.values = [0; REGISTER_COUNT];
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Registers {
    /// Renders the bank as `"[EAX = x, EBX = y, ..., EDI = z]"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = Register::ALL
            .iter()
            .map(|r| format!("{} = {}", r, self.get(*r)))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{}]", entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bank_is_all_zero() {
        let registers = Registers::new();
        for register in Register::ALL {
            assert_eq!(registers.get(register), 0);
        }
    }

    #[test]
    fn set_overwrites_unconditionally() {
        let mut registers = Registers::new();
        registers.set(Register::EAX, 5);
        registers.set(Register::EAX, -3);
        assert_eq!(registers.get(Register::EAX), -3);
    }

    #[test]
    fn clear_resets_every_register() {
        let mut registers = Registers::new();
        for register in Register::ALL {
            registers.set(register, 42);
        }
        registers.clear();
        for register in Register::ALL {
            assert_eq!(registers.get(register), 0);
        }
    }

    #[test]
    fn equal_when_values_match() {
        let mut a = Registers::new();
        let mut b = Registers::new();
        assert_eq!(a, b);
        a.set(Register::EBX, 1);
        assert_ne!(a, b);
        b.set(Register::EBX, 1);
        assert_eq!(a, b);
    }

    #[test]
    fn display_lists_registers_in_bank_order() {
        let mut registers = Registers::new();
        registers.set(Register::EAX, 7);
        assert_eq!(
            registers.to_string(),
            "[EAX = 7, EBX = 0, ECX = 0, EDX = 0, ESP = 0, EBP = 0, ESI = 0, EDI = 0]"
        );
    }

    #[test]
    fn register_from_str() {
        assert_eq!("EAX".parse::<Register>().unwrap(), Register::EAX);
        assert_eq!("EDI".parse::<Register>().unwrap(), Register::EDI);
        assert!("eax".parse::<Register>().is_err());
        assert!("R0".parse::<Register>().is_err());
    }
}
