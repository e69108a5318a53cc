use crate::{
    condition::Condition,
    operand::Operand,
    Register, Width,
};

use super::{
    assembler::{self, layout},
    kind::InstructionKind,
    AssemblyError, Instruction, InstructionDeassemblyError,
};

#[test]
fn opcode_table_round_trips() {
    for (index, kind) in InstructionKind::ALL.iter().enumerate() {
        assert_eq!(kind.opcode() as usize, index, "{} out of order", kind);
        assert_eq!(InstructionKind::from_opcode(index as u8), Some(*kind));
        assert_eq!(InstructionKind::from_mnemonic(kind.mnemonic()), Some(*kind));
    }

    assert_eq!(InstructionKind::from_opcode(30), None);
    assert_eq!(InstructionKind::from_opcode(63), None);
    assert_eq!(InstructionKind::from_mnemonic("nop"), None);
}

#[test]
fn assembler_enumeration_is_kept() {
    // Shared with the external assembler's enumeration.
    assert_eq!(InstructionKind::Mov.opcode(), 0);
    assert_eq!(InstructionKind::Halt.opcode(), 14);
    assert_eq!(InstructionKind::Jmp.opcode(), 15);
    assert_eq!(InstructionKind::Putc.opcode(), 22);
    assert_eq!(InstructionKind::LNot.opcode(), 26);
}

#[test]
fn assembles_opcode_byte_and_big_endian_operands() {
    let instruction = Instruction::new(InstructionKind::Add)
        .with_width(Width::W2)
        .with_operand(Operand::immediate(2).unwrap())
        .with_operand(Operand::immediate(0x0123).unwrap())
        .with_operand(Operand::register(Register::Aaa));

    let machine_code = instruction.assemble().unwrap();

    assert_eq!(
        machine_code,
        [0b01_000001, 0x00, 0x02, 0x01, 0x23, 0x80, 0x00]
    );
    assert_eq!(machine_code.len(), instruction.encoded_len());
}

#[test]
fn rejects_wrong_operand_count() {
    let error = Instruction::new(InstructionKind::Mov)
        .with_operand(Operand::register(Register::Acc))
        .assemble()
        .unwrap_err();

    assert_eq!(
        error,
        AssemblyError::OperandCountMismatch {
            kind: InstructionKind::Mov,
            expected: 2,
            actual: 1,
        }
    );
}

#[test]
fn deassembles_opcode_byte() {
    assert_eq!(
        Instruction::deassemble_opcode_byte(0b11_001110),
        Ok((InstructionKind::Halt, Width::W8))
    );
    assert_eq!(
        Instruction::deassemble_opcode_byte(0b10_111111),
        Err(InstructionDeassemblyError::UnrecognizedOpcode(63))
    );
}

#[test]
fn displays_instruction() {
    let jmp = Instruction::new(InstructionKind::Jmp)
        .with_width(Width::W2)
        .with_operand(Operand::raw(Condition::NotEqual.code()))
        .with_operand(Operand::memory(0x10).unwrap());

    let mov = Instruction::new(InstructionKind::Mov)
        .with_operand(Operand::register_indirect(Register::Bsp))
        .with_operand(Operand::immediate(5).unwrap());

    let sxi = Instruction::new(InstructionKind::Sxi)
        .with_operands([
            Operand::register(Register::Aaa),
            Operand::register(Register::Bbb),
            Operand::raw(8),
        ]);

    assert_eq!(jmp.to_string(), "jmp2 ne, [0x0010]");
    assert_eq!(mov.to_string(), "mov1 [%bsp], #5");
    assert_eq!(sxi.to_string(), "sxi1 %aaa, %bbb, 8");
}

#[test]
fn assemble_extra_maps_instruction_offsets() {
    let program = [
        (
            Instruction::new(InstructionKind::Push).with_operand(Operand::immediate(1).unwrap()),
            "first",
        ),
        (Instruction::new(InstructionKind::Halt), "second"),
        (
            Instruction::new(InstructionKind::Putc).with_operand(Operand::immediate(0x41).unwrap()),
            "third",
        ),
    ];

    let offsets = layout(program.iter().map(|(instruction, _)| instruction));
    let output = assembler::assemble_extra(program).unwrap();

    assert_eq!(offsets, [0, 3, 4]);
    assert_eq!(output.offset_of(&"first"), Some(0));
    assert_eq!(output.offset_of(&"second"), Some(3));
    assert_eq!(output.offset_of(&"third"), Some(4));
    assert_eq!(output.machine_code.len(), 7);
}
