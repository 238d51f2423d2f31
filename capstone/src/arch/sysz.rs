use crate::layout::StructLayout;
use core::fmt;

/// The maximum number of operands that a SystemZ instruction can have.
pub const MAX_OPERANDS: usize = 6;

/// SystemZ instruction details (`cs_sysz`).
#[repr(C)]
#[derive(Clone, Copy)]
pub struct Details {
    /// Code condition.
    cc: SyszCC,

    /// Number of operands of this instruction,
    /// or 0 when instruction has no operand.
    op_count: u8,

    /// Operands for this instruction.
    operands: [Op; MAX_OPERANDS],
}

impl Details {
    /// Creates instruction details from a condition code and up to
    /// [`MAX_OPERANDS`] operands. Any operands past that are dropped.
    pub fn new(cc: Cc, operands: &[Op]) -> Details {
        let count = operands.len().min(MAX_OPERANDS);
        let mut details = Details {
            cc: cc.to_c(),
            op_count: count as u8,
            operands: [Op::invalid(); MAX_OPERANDS],
        };
        details.operands[..count].copy_from_slice(&operands[..count]);
        details
    }

    /// The condition code of this instruction.
    #[inline]
    pub fn cc(&self) -> Cc {
        Cc::from_c(self.cc).unwrap_or(Cc::Invalid)
    }

    /// Returns the operands of this instruction.
    #[inline]
    pub fn operands(&self) -> &[Op] {
        let count = (self.op_count as usize).min(MAX_OPERANDS);
        &self.operands[..count]
    }
}

impl fmt::Debug for Details {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Details")
            .field("cc", &self.cc())
            .field("operands", &self.operands())
            .finish()
    }
}

/// An operand of a SystemZ instruction (`cs_sysz_op`).
#[repr(C)]
#[derive(Clone, Copy)]
pub struct Op {
    type_: SyszOpType,
    value: SyszOpValue,
}

impl Op {
    fn invalid() -> Op {
        Op {
            type_: OpType::Invalid.to_c(),
            value: SyszOpValue { imm: 0 },
        }
    }

    /// A register operand.
    pub fn reg(reg: Reg) -> Op {
        Op {
            type_: OpType::Reg.to_c(),
            value: SyszOpValue { reg: reg.to_c() },
        }
    }

    /// An immediate operand.
    pub fn imm(imm: i64) -> Op {
        Op {
            type_: OpType::Imm.to_c(),
            value: SyszOpValue { imm },
        }
    }

    /// A memory operand.
    pub fn mem(mem: OpMem) -> Op {
        Op {
            type_: OpType::Mem.to_c(),
            value: SyszOpValue { mem },
        }
    }

    /// An access register operand. Capstone stores the access register
    /// number in the `reg` member.
    pub fn acreg(acreg: u8) -> Op {
        Op {
            type_: OpType::AcReg.to_c(),
            value: SyszOpValue {
                reg: acreg as libc::c_int,
            },
        }
    }

    /// The type of this operand or `None` if the type is not one that
    /// these bindings know about.
    #[inline]
    pub fn op_type(&self) -> Option<OpType> {
        OpType::from_c(self.type_)
    }

    /// The value of this operand.
    pub fn value(&self) -> OpValue {
        unsafe {
            match self.op_type() {
                Some(OpType::Reg) => {
                    OpValue::Reg(Reg::from_c(self.value.reg).unwrap_or(Reg::Invalid))
                }
                Some(OpType::Imm) => OpValue::Imm(self.value.imm),
                Some(OpType::Mem) => OpValue::Mem(self.value.mem),
                Some(OpType::AcReg) => OpValue::AcReg(self.value.reg as u8),
                Some(OpType::Invalid) | None => OpValue::Invalid,
            }
        }
    }
}

impl fmt::Debug for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value(), f)
    }
}

/// The value of an operand, read from the member of the operand union
/// selected by the operand's type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpValue {
    Reg(Reg),
    Imm(i64),
    Mem(OpMem),
    AcReg(u8),
    Invalid,
}

/// A memory operand (`sysz_op_mem`).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpMem {
    /// Base register. This is a `sysz_reg` but only one byte wide.
    base: u8,
    /// Index register.
    index: u8,
    /// BDLAddr operand.
    length: u64,
    /// Displacement/offset value.
    disp: i64,
}

impl OpMem {
    pub fn new(base: Reg, index: Reg, length: u64, disp: i64) -> OpMem {
        OpMem {
            base: base.to_primitive(),
            index: index.to_primitive(),
            length,
            disp,
        }
    }

    /// Base register.
    #[inline]
    pub fn base(&self) -> Reg {
        Reg::from_primitive(self.base).unwrap_or(Reg::Invalid)
    }

    /// Index register.
    #[inline]
    pub fn index(&self) -> Reg {
        Reg::from_primitive(self.index).unwrap_or(Reg::Invalid)
    }

    #[inline]
    pub fn length(&self) -> u64 {
        self.length
    }

    #[inline]
    pub fn disp(&self) -> i64 {
        self.disp
    }
}

/// sysz_cc
type SyszCC = libc::c_int;
/// sysz_op_type
type SyszOpType = libc::c_int;
/// sysz_reg
type SyszReg = libc::c_int;

#[repr(C)]
#[derive(Clone, Copy)]
union SyszOpValue {
    /// Register value for REG operand.
    reg: SyszReg,
    /// Immediate value for IMM operand.
    imm: i64,
    /// Base/disp value for MEM operand.
    mem: OpMem,
}

c_enum! {
    /// Operand type for a SystemZ instruction's operands.
    #[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
    pub enum OpType: u8 {
        /// Uninitialized.
        Invalid = 0,
        /// Register operand.
        Reg,
        /// Immediate operand.
        Imm,
        /// Memory operand.
        Mem,
        /// Access register operand.
        AcReg = 64,
    }
}

c_enum! {
    /// SystemZ condition codes.
    #[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
    pub enum Cc: u8 {
        Invalid = 0,
        O,
        H,
        Nle,
        L,
        Nhe,
        Lh,
        Ne,
        E,
        Nlh,
        He,
        Nl,
        Le,
        Nh,
        No,
    }
}

c_enum! {
    #[non_exhaustive]
    #[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
    pub enum Reg: u8 {
        Invalid = 0,
        R0,
        R1,
        R2,
        R3,
        R4,
        R5,
        R6,
        R7,
        R8,
        R9,
        R10,
        R11,
        R12,
        R13,
        R14,
        R15,
        Cc,
        F0,
        F1,
        F2,
        F3,
        F4,
        F5,
        F6,
        F7,
        F8,
        F9,
        F10,
        F11,
        F12,
        F13,
        F14,
        F15,
        R0L,
    }
}

/// Layout of `sysz_op_mem`.
pub const OP_MEM_LAYOUT: StructLayout = struct_layout!(OpMem as "sysz_op_mem" {
    "base" => base,
    "index" => index,
    "length" => length,
    "disp" => disp,
});

/// Layout of `cs_sysz_op`. The members of the anonymous union are reported
/// as fields of the operand.
pub const OP_LAYOUT: StructLayout = struct_layout!(Op as "cs_sysz_op" {
    "type" => type_,
    "reg" => value.reg,
    "imm" => value.imm,
    "mem" => value.mem,
});

/// Layout of `cs_sysz`.
pub const DETAILS_LAYOUT: StructLayout = struct_layout!(Details as "cs_sysz" {
    "cc" => cc,
    "op_count" => op_count,
    "operands" => operands,
});

/// Layouts of all of the SystemZ detail types, innermost first.
pub const LAYOUTS: &[StructLayout] = &[OP_MEM_LAYOUT, OP_LAYOUT, DETAILS_LAYOUT];
