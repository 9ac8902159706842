//! # Instruction-Tree Coordinates
//!
//! Every instruction-tree message is prefixed with the full path to the
//! offending node so a caller can locate it without re-walking the tree:
//!
//! ```text
//! instruction #2, group #1, transfer command #3, 'from' direction
//! instruction #1, group #4, distribute command, 'to' direction #2
//! instruction #3, group #1, mix command, 'mix' direction #1
//! ```
//!
//! Numbers are 1-based. Coordinates carry attribution only; no check
//! branches on them except through [`DirectionRole`].

use std::fmt;

use protoval_core::CommandTag;

/// What a direction stands for within its command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionRole {
    /// Aspirate side.
    From,
    /// Dispense side.
    To,
    /// A mix point.
    Mix,
}

impl DirectionRole {
    /// The attribute name the role is read from (`mix` for mix points).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::From => "from",
            Self::To => "to",
            Self::Mix => "mix",
        }
    }
}

impl fmt::Display for DirectionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionAt {
    /// 1-based instruction number.
    pub instruction: usize,
}

impl InstructionAt {
    /// Coordinate of the instruction at 0-based `index`.
    pub fn from_index(index: usize) -> Self {
        Self {
            instruction: index + 1,
        }
    }

    /// Coordinate of the group at 0-based `index` within this instruction.
    pub fn group(self, index: usize) -> GroupAt {
        GroupAt {
            instruction: self.instruction,
            group: index + 1,
        }
    }
}

impl fmt::Display for InstructionAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instruction #{}", self.instruction)
    }
}

/// Position of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupAt {
    /// 1-based instruction number.
    pub instruction: usize,
    /// 1-based group number.
    pub group: usize,
}

impl GroupAt {
    /// The single command of a one-command variant (distribute, consolidate, mix).
    pub fn command(self, tag: CommandTag) -> CommandAt {
        CommandAt {
            group: self,
            tag,
            command: None,
        }
    }

    /// Command at 0-based `index` of a multi-command variant (transfer).
    pub fn nth_command(self, tag: CommandTag, index: usize) -> CommandAt {
        CommandAt {
            group: self,
            tag,
            command: Some(index + 1),
        }
    }
}

impl fmt::Display for GroupAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instruction #{}, group #{}", self.instruction, self.group)
    }
}

/// Position of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandAt {
    /// Enclosing group.
    pub group: GroupAt,
    /// Variant tag.
    pub tag: CommandTag,
    /// 1-based command number, for variants holding a sequence of commands.
    pub command: Option<usize>,
}

impl CommandAt {
    /// The single direction playing `role`.
    pub fn direction(self, role: DirectionRole) -> DirectionAt {
        DirectionAt {
            command: self,
            role,
            index: None,
        }
    }

    /// Direction at 0-based `index` among several playing `role`.
    pub fn nth_direction(self, role: DirectionRole, index: usize) -> DirectionAt {
        DirectionAt {
            command: self,
            role,
            index: Some(index + 1),
        }
    }
}

impl fmt::Display for CommandAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} command", self.group, self.tag)?;
        if let Some(n) = self.command {
            write!(f, " #{n}")?;
        }
        Ok(())
    }
}

/// Position of a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionAt {
    /// Enclosing command.
    pub command: CommandAt,
    /// Role within the command.
    pub role: DirectionRole,
    /// 1-based direction number when the role is played by a sequence.
    pub index: Option<usize>,
}

impl fmt::Display for DirectionAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, '{}' direction", self.command, self.role)?;
        if let Some(n) = self.index {
            write!(f, " #{n}")?;
        }
        Ok(())
    }
}
