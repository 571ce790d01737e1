// Crux - A teaching compiler translating Crux programs into MIPS assembly
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Shared helpers for the integration tests.
//!
//! `Machine` executes the subset of MIPS assembly the compiler emits, with
//! the SPIM syscalls the runtime uses. It lets end-to-end tests check what a
//! compiled program prints without SPIM installed.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use cruxc::Program;

const DATA_BASE: u32 = 0x1001_0000;
const STACK_TOP: u32 = 0x7fff_fffc;
/// Return address that ends the program when `main` returns.
const EXIT_ADDRESS: u32 = u32::MAX;
const STEP_LIMIT: usize = 5_000_000;

/// Compile a program that must be free of diagnostics.
pub fn compile_ok(source: &str) -> Program {
    let compilation = cruxc::compile(source).expect("code generation");
    assert!(
        !compilation.has_errors(),
        "unexpected diagnostics:\n{}",
        compilation.report()
    );
    compilation.program.expect("program")
}

/// Diagnostics of a program, rendered one per element.
pub fn diagnostics(source: &str) -> Vec<String> {
    let compilation = cruxc::compile(source).expect("code generation");
    compilation
        .diagnostics
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Compile a program, run it with the given input and return its output.
pub fn run(source: &str, input: &str) -> String {
    let program = compile_ok(source);
    let mut machine = Machine::load(&program.to_string(), input).expect("assembly loads");
    machine.run().expect("program runs");
    machine.output
}

struct Instruction {
    mnemonic: String,
    operands: Vec<String>,
}

/// A tiny MIPS machine.
pub struct Machine {
    code: Vec<Instruction>,
    code_labels: HashMap<String, usize>,
    data_labels: HashMap<String, u32>,
    memory: HashMap<u32, u8>,
    registers: HashMap<String, u32>,
    float_registers: HashMap<String, f32>,
    lo: u32,
    condition: bool,
    input: VecDeque<String>,
    /// Everything the program printed.
    pub output: String,
}

impl Machine {
    /// Load assembly text as printed by `Program`.
    pub fn load(text: &str, input: &str) -> Result<Self, String> {
        let mut machine = Machine {
            code: Vec::new(),
            code_labels: HashMap::new(),
            data_labels: HashMap::new(),
            memory: HashMap::new(),
            registers: HashMap::new(),
            float_registers: HashMap::new(),
            lo: 0,
            condition: false,
            input: input.split_whitespace().map(str::to_string).collect(),
            output: String::new(),
        };

        let mut in_data = false;
        let mut next_data = DATA_BASE;
        for raw in text.lines() {
            let line = raw.trim();
            match line {
                "" | ".globl main" => continue,
                ".data" => {
                    in_data = true;
                    continue;
                }
                ".text" => {
                    in_data = false;
                    continue;
                }
                _ => {}
            }
            if in_data {
                next_data = machine.load_data(line, next_data)?;
            } else if let Some(label) = line.strip_suffix(':') {
                machine.code_labels.insert(label.to_string(), machine.code.len());
            } else {
                let (mnemonic, rest) = line.split_once(' ').unwrap_or((line, ""));
                let operands = rest
                    .split(',')
                    .map(str::trim)
                    .filter(|operand| !operand.is_empty())
                    .map(str::to_string)
                    .collect();
                machine.code.push(Instruction {
                    mnemonic: mnemonic.to_string(),
                    operands,
                });
            }
        }
        Ok(machine)
    }

    fn load_data(&mut self, line: &str, address: u32) -> Result<u32, String> {
        let (label, directive) = line
            .split_once(": ")
            .ok_or_else(|| format!("bad data line {:?}", line))?;
        self.data_labels.insert(label.to_string(), address);
        let (kind, argument) = directive.split_once(' ').unwrap_or((directive, ""));
        let size = match kind {
            ".word" => 4,
            ".space" => argument.parse::<u32>().map_err(|e| e.to_string())?,
            ".asciiz" => {
                let text = argument.trim_matches('"').replace("\\n", "\n");
                for (i, byte) in text.bytes().enumerate() {
                    self.memory.insert(address + i as u32, byte);
                }
                self.memory.insert(address + text.len() as u32, 0);
                text.len() as u32 + 1
            }
            other => return Err(format!("unknown directive {}", other)),
        };
        // keep words aligned
        Ok(address + (size + 3) / 4 * 4)
    }

    /// Run from `main` until it returns.
    pub fn run(&mut self) -> Result<(), String> {
        let mut pc = *self.code_labels.get("main").ok_or("no main label")?;
        self.set("$sp", STACK_TOP);
        self.set("$ra", EXIT_ADDRESS);

        for _ in 0..STEP_LIMIT {
            let instruction = self
                .code
                .get(pc)
                .ok_or_else(|| format!("fell off the code at {}", pc))?;
            let mnemonic = instruction.mnemonic.clone();
            let ops = instruction.operands.clone();
            pc += 1;

            match mnemonic.as_str() {
                "li" => {
                    let value = ops[1].parse::<i32>().map_err(|e| e.to_string())?;
                    self.set(&ops[0], value as u32);
                }
                "li.s" => {
                    let value = ops[1].parse::<f32>().map_err(|e| e.to_string())?;
                    self.float_registers.insert(ops[0].clone(), value);
                }
                "la" => {
                    let address = if ops[1].contains('(') {
                        self.memory_address(&ops[1])?
                    } else {
                        *self
                            .data_labels
                            .get(&ops[1])
                            .ok_or_else(|| format!("unknown data label {}", ops[1]))?
                    };
                    self.set(&ops[0], address);
                }
                "addu" | "addiu" | "addi" | "add" => {
                    let value = self.get(&ops[1]).wrapping_add(self.operand(&ops[2])?);
                    self.set(&ops[0], value);
                }
                "subu" | "sub" => {
                    let value = self.get(&ops[1]).wrapping_sub(self.operand(&ops[2])?);
                    self.set(&ops[0], value);
                }
                "mul" => {
                    let value = (self.get(&ops[1]) as i32).wrapping_mul(self.get(&ops[2]) as i32);
                    self.set(&ops[0], value as u32);
                }
                "div" => {
                    let divisor = self.get(&ops[1]) as i32;
                    let dividend = self.get(&ops[0]) as i32;
                    if divisor == 0 {
                        return Err("division by zero".to_string());
                    }
                    self.lo = dividend.wrapping_div(divisor) as u32;
                }
                "mflo" => {
                    let lo = self.lo;
                    self.set(&ops[0], lo);
                }
                "and" => {
                    let value = self.get(&ops[1]) & self.get(&ops[2]);
                    self.set(&ops[0], value);
                }
                "or" => {
                    let value = self.get(&ops[1]) | self.get(&ops[2]);
                    self.set(&ops[0], value);
                }
                "xori" => {
                    let value = self.get(&ops[1]) ^ self.operand(&ops[2])?;
                    self.set(&ops[0], value);
                }
                "sw" => {
                    let address = self.memory_address(&ops[1])?;
                    let value = self.get(&ops[0]);
                    self.store(address, value);
                }
                "lw" => {
                    let address = self.memory_address(&ops[1])?;
                    let value = self.load_word(address);
                    self.set(&ops[0], value);
                }
                "swc1" => {
                    let address = self.memory_address(&ops[1])?;
                    let value = self.float(&ops[0]).to_bits();
                    self.store(address, value);
                }
                "lwc1" | "l.s" => {
                    let address = self.memory_address(&ops[1])?;
                    let value = f32::from_bits(self.load_word(address));
                    self.float_registers.insert(ops[0].clone(), value);
                }
                "mfc1" => {
                    let bits = self.float(&ops[1]).to_bits();
                    self.set(&ops[0], bits);
                }
                "add.s" | "sub.s" | "mul.s" | "div.s" => {
                    let (left, right) = (self.float(&ops[1]), self.float(&ops[2]));
                    let value = match mnemonic.as_str() {
                        "add.s" => left + right,
                        "sub.s" => left - right,
                        "mul.s" => left * right,
                        _ => left / right,
                    };
                    self.float_registers.insert(ops[0].clone(), value);
                }
                "c.eq.s" => self.condition = self.float(&ops[0]) == self.float(&ops[1]),
                "c.lt.s" => self.condition = self.float(&ops[0]) < self.float(&ops[1]),
                "c.le.s" => self.condition = self.float(&ops[0]) <= self.float(&ops[1]),
                "bc1t" => {
                    if self.condition {
                        pc = self.code_label(&ops[0])?;
                    }
                }
                "beq" | "bne" | "blt" | "ble" | "bge" | "bgt" => {
                    let left = self.get(&ops[0]) as i32;
                    let right = self.get(&ops[1]) as i32;
                    let taken = match mnemonic.as_str() {
                        "beq" => left == right,
                        "bne" => left != right,
                        "blt" => left < right,
                        "ble" => left <= right,
                        "bge" => left >= right,
                        _ => left > right,
                    };
                    if taken {
                        pc = self.code_label(&ops[2])?;
                    }
                }
                "beqz" => {
                    if self.get(&ops[0]) == 0 {
                        pc = self.code_label(&ops[1])?;
                    }
                }
                "j" => pc = self.code_label(&ops[0])?,
                "jal" => {
                    self.set("$ra", pc as u32);
                    pc = self.code_label(&ops[0])?;
                }
                "jr" => {
                    let target = self.get(&ops[0]);
                    if target == EXIT_ADDRESS {
                        return Ok(());
                    }
                    pc = target as usize;
                }
                "syscall" => {
                    if !self.syscall()? {
                        return Ok(());
                    }
                }
                other => return Err(format!("unsupported instruction {}", other)),
            }
        }
        Err("step limit exceeded".to_string())
    }

    /// Perform the syscall in `$v0`. Returns false on exit.
    fn syscall(&mut self) -> Result<bool, String> {
        match self.get("$v0") {
            1 => {
                let value = self.get("$a0") as i32;
                self.output.push_str(&value.to_string());
            }
            2 => {
                let value = self.float("$f12");
                self.output.push_str(&value.to_string());
            }
            4 => {
                let mut address = self.get("$a0");
                while let Some(byte) = self.memory.get(&address).copied().filter(|b| *b != 0) {
                    self.output.push(byte as char);
                    address += 1;
                }
            }
            5 => {
                let word = self.input.pop_front().ok_or("input exhausted")?;
                let value = word.parse::<i32>().map_err(|e| e.to_string())?;
                self.set("$v0", value as u32);
            }
            6 => {
                let word = self.input.pop_front().ok_or("input exhausted")?;
                let value = word.parse::<f32>().map_err(|e| e.to_string())?;
                self.float_registers.insert("$f0".to_string(), value);
            }
            10 => return Ok(false),
            other => return Err(format!("unsupported syscall {}", other)),
        }
        Ok(true)
    }

    fn get(&self, register: &str) -> u32 {
        if register == "$zero" {
            return 0;
        }
        self.registers.get(register).copied().unwrap_or(0)
    }

    fn set(&mut self, register: &str, value: u32) {
        self.registers.insert(register.to_string(), value);
    }

    fn float(&self, register: &str) -> f32 {
        self.float_registers.get(register).copied().unwrap_or(0.0)
    }

    /// A register or an immediate.
    fn operand(&self, operand: &str) -> Result<u32, String> {
        if operand.starts_with('$') {
            Ok(self.get(operand))
        } else {
            operand
                .parse::<i32>()
                .map(|value| value as u32)
                .map_err(|e| format!("bad immediate {:?}: {}", operand, e))
        }
    }

    /// Resolve `offset(register)`.
    fn memory_address(&self, operand: &str) -> Result<u32, String> {
        let (offset, rest) = operand
            .split_once('(')
            .ok_or_else(|| format!("bad memory operand {:?}", operand))?;
        let register = rest.trim_end_matches(')');
        let offset = offset.parse::<i32>().map_err(|e| e.to_string())?;
        Ok(self.get(register).wrapping_add(offset as u32))
    }

    fn code_label(&self, label: &str) -> Result<usize, String> {
        self.code_labels
            .get(label)
            .copied()
            .ok_or_else(|| format!("unknown code label {}", label))
    }

    fn store(&mut self, address: u32, value: u32) {
        for (i, byte) in value.to_le_bytes().iter().enumerate() {
            self.memory.insert(address + i as u32, *byte);
        }
    }

    fn load_word(&self, address: u32) -> u32 {
        let mut bytes = [0u8; 4];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = self.memory.get(&(address + i as u32)).copied().unwrap_or(0);
        }
        u32::from_le_bytes(bytes)
    }
}
