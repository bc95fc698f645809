//! Test data builders

use bytegraph_ir::shared::models::*;

pub fn v(index: usize) -> Variable {
    Variable::from_index(index)
}

pub fn b(index: usize) -> BlockId {
    BlockId::from_index(index)
}

/// Builder for Program
///
/// Instructions and phis go into the most recently created block.
#[derive(Debug)]
pub struct ProgramBuilder {
    program: Program,
    current: Option<BlockId>,
}

impl ProgramBuilder {
    /// Program with `variables` pre-allocated variables and no blocks
    pub fn new(variables: usize) -> Self {
        Self {
            program: Program::with_variables(variables),
            current: None,
        }
    }

    /// Start a new block
    pub fn block(mut self) -> Self {
        self.current = Some(self.program.create_basic_block());
        self
    }

    pub fn insn(mut self, instruction: Instruction) -> Self {
        let block = self.current_block();
        self.program
            .basic_block_at_mut(block)
            .expect("current block exists")
            .add(instruction);
        self
    }

    pub fn insns(mut self, instructions: impl IntoIterator<Item = Instruction>) -> Self {
        for instruction in instructions {
            self = self.insn(instruction);
        }
        self
    }

    pub fn phi(mut self, receiver: usize, incomings: &[(usize, usize)]) -> Self {
        let block = self.current_block();
        let phi = incomings
            .iter()
            .fold(Phi::new(v(receiver)), |phi, &(source, value)| phi.with_incoming(b(source), v(value)));
        self.program
            .basic_block_at_mut(block)
            .expect("current block exists")
            .add_phi(phi);
        self
    }

    pub fn build(self) -> Program {
        self.program
    }

    fn current_block(&mut self) -> BlockId {
        match self.current {
            Some(block) => block,
            None => {
                let block = self.program.create_basic_block();
                self.current = Some(block);
                block
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Instruction constructors
// ═══════════════════════════════════════════════════════════════════════════

pub fn construct(receiver: usize) -> Instruction {
    Instruction::Construct(ConstructInstruction {
        receiver: v(receiver),
        class_name: "Node".to_string(),
    })
}

pub fn assign(receiver: usize, assignee: usize) -> Instruction {
    Instruction::Assign(AssignInstruction {
        receiver: v(receiver),
        assignee: v(assignee),
    })
}

pub fn cast(receiver: usize, value: usize) -> Instruction {
    Instruction::Cast(CastInstruction {
        receiver: v(receiver),
        value: v(value),
        target_type: "LNode;".to_string(),
    })
}

pub fn null_check(receiver: usize, value: usize) -> Instruction {
    Instruction::NullCheck(NullCheckInstruction {
        receiver: v(receiver),
        value: v(value),
    })
}

pub fn get_field(receiver: usize, instance: Option<usize>) -> Instruction {
    Instruction::GetField(GetFieldInstruction {
        receiver: v(receiver),
        instance: instance.map(v),
        field: FieldReference::new("Node", "next"),
        field_type: "LNode;".to_string(),
    })
}

pub fn put_field(instance: Option<usize>, value: usize) -> Instruction {
    Instruction::PutField(PutFieldInstruction {
        instance: instance.map(v),
        value: v(value),
        field: FieldReference::new("Node", "next"),
        field_type: "LNode;".to_string(),
    })
}

pub fn invoke(kind: InvocationType, instance: Option<usize>, arguments: &[usize], receiver: Option<usize>) -> Instruction {
    Instruction::Invoke(InvokeInstruction {
        kind,
        method: MethodReference::new(
            "Node",
            "visit",
            arguments.iter().map(|_| "LNode;".to_string()).collect(),
            if receiver.is_some() { "LNode;" } else { "V" },
        ),
        instance: instance.map(v),
        arguments: arguments.iter().copied().map(v).collect(),
        receiver: receiver.map(v),
    })
}

pub fn jump(target: usize) -> Instruction {
    Instruction::Jump(JumpInstruction { target: b(target) })
}

pub fn branch(operand: usize, consequent: usize, alternative: usize) -> Instruction {
    Instruction::Branching(BranchingInstruction {
        condition: BranchingCondition::NotNull,
        operand: v(operand),
        consequent: b(consequent),
        alternative: b(alternative),
    })
}

pub fn exit(value: Option<usize>) -> Instruction {
    Instruction::Exit(ExitInstruction {
        value_to_return: value.map(v),
    })
}

pub fn method(parameters: usize) -> MethodReference {
    MethodReference::new("Node", "run", vec!["LNode;".to_string(); parameters], "V")
}
