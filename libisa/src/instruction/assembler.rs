use std::hash::Hash;

use bimap::BiMap;

use super::{AssemblyError, Instruction};

pub struct AssemblyOutput<T>
where
    T: Hash + Eq,
{
    pub machine_code: Vec<u8>,

    /// Instruction start offset (left) to extra (right) or vice versa mapping.
    pub extra_map: BiMap<usize, T>,
}

impl<T> AssemblyOutput<T>
where
    T: Hash + Eq,
{
    pub fn offset_of(&self, extra: &T) -> Option<usize> {
        self.extra_map.get_by_right(extra).copied()
    }
}

pub fn assemble<I>(instructions: I) -> Result<Vec<u8>, AssemblyError>
where
    I: IntoIterator<Item = Instruction>,
{
    instructions
        .into_iter()
        .try_fold(Vec::new(), |mut machine_code, instruction| {
            machine_code.extend(instruction.assemble()?);
            Ok(machine_code)
        })
}

/// Assembles instructions tagged with an extra value, remembering where each tagged instruction starts.
/// Tags should be unique, a repeated tag keeps only its latest offset.
pub fn assemble_extra<I, T>(instructions: I) -> Result<AssemblyOutput<T>, AssemblyError>
where
    I: IntoIterator<Item = (Instruction, T)>,
    T: Hash + Eq,
{
    instructions.into_iter().try_fold(
        AssemblyOutput {
            machine_code: Vec::new(),
            extra_map: BiMap::new(),
        },
        |mut output, (instruction, extra)| {
            let instruction_machine_code = instruction.assemble()?;

            output
                .extra_map
                .insert(output.machine_code.len(), extra);
            output.machine_code.extend(instruction_machine_code);

            Ok(output)
        },
    )
}

/// Byte offset each instruction would start at, without encoding anything.
/// Handy for computing jump and call targets before assembling.
pub fn layout<'a, I>(instructions: I) -> Vec<usize>
where
    I: IntoIterator<Item = &'a Instruction>,
{
    instructions
        .into_iter()
        .scan(0, |offset, instruction| {
            let start = *offset;
            *offset += instruction.encoded_len();
            Some(start)
        })
        .collect()
}
