//! The machine: register bank, label table, program, and fetch-execute loop.
//!
//! # Execution model
//!
//! The machine moves Ready -> Running -> Halted. While the program counter is
//! a valid program index, it fetches the instruction there, executes it, and
//! sets the next counter to either the next address or the jump target. There
//! is no halt instruction: execution stops by running off the end of the
//! program, including jumps past it.
//!
//! Runtime faults (division by zero, unresolved jump label) are reported
//! through the log and the counter advances sequentially; they never abort
//! the run. A second `run()` without `reset()` resumes from the stored
//! program counter rather than restarting; the caller manages this
//! explicitly.

use crate::instruction::ControlFlow;
use crate::labels::Labels;
use crate::program::Program;
use crate::registers::Registers;
use std::mem;

/// Receives values emitted by the `out` instruction.
pub trait OutputSink {
    /// Called once per emitted value, in execution order.
    fn emit(&mut self, value: i64);
}

/// Default sink: writes each value on its own stdout line.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, value: i64) {
        println!("{value}");
    }
}

/// Execution state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Program counter at 0, registers cleared.
    Ready,
    /// Inside the fetch-execute loop.
    Running,
    /// Program counter has left the program.
    Halted,
}

/// A machine owning its register bank, label table, and program.
pub struct Machine {
    registers: Registers,
    labels: Labels,
    program: Program,
    program_counter: usize,
    status: Status,
    output: Box<dyn OutputSink>,
}

impl Machine {
    /// Creates a machine for the translated program, emitting to stdout.
    pub fn new(program: Program, labels: Labels) -> Self {
        Self::with_output(program, labels, Box::new(StdoutSink))
    }

    /// Creates a machine emitting `out` values to the given sink.
    pub fn with_output(program: Program, labels: Labels, output: Box<dyn OutputSink>) -> Self {
        Self {
            registers: Registers::new(),
            labels,
            program,
            program_counter: 0,
            status: Status::Ready,
            output,
        }
    }

    /// The register bank.
    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    /// Mutable access to the register bank, used by executing instructions.
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    /// The label table.
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// The owned program.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Address of the next instruction to execute.
    pub fn program_counter(&self) -> usize {
        self.program_counter
    }

    /// Current execution state.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Forwards a value emitted by `out` to the output sink.
    pub fn emit(&mut self, value: i64) {
        self.output.emit(value);
    }

    /// Runs the fetch-execute loop until the program counter leaves the
    /// program.
    ///
    /// Resumes from the stored program counter; call [`reset`](Self::reset)
    /// first to restart from a cleared state.
    pub fn run(&mut self) {
        self.status = Status::Running;

        // The program is read-only during execution; detach it so the
        // instruction can borrow the machine mutably.
        let program = mem::take(&mut self.program);
        while let Some(instruction) = program.get(self.program_counter) {
            self.program_counter = match instruction.execute(self) {
                Ok(ControlFlow::Advance) => self.program_counter + 1,
                Ok(ControlFlow::Jump(address)) => address,
                Err(fault) => {
                    crate::error!("{fault}");
                    self.program_counter + 1
                }
            };
        }
        self.program = program;

        self.status = Status::Halted;
    }

    /// Returns the machine to Ready: registers cleared, program counter
    /// zeroed. The program and labels are kept.
    pub fn reset(&mut self) {
        self.registers.clear();
        self.program_counter = 0;
        self.status = Status::Ready;
    }
}
