use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Constant,
    Argument,
    Static,
    Local,
    This,
    That,
    Pointer,
    Temp,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Segment::Constant => "constant",
            Segment::Argument => "argument",
            Segment::Static => "static",
            Segment::Local => "local",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Pointer => "pointer",
            Segment::Temp => "temp",
        };
        f.write_str(s)
    }
}

/// Arithmetic and logic operators as the translator sees them. `Mul` and
/// `Div` have no machine instruction and are lowered to runtime calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
    Mul,
    Div,
}

impl Command {
    pub fn from_binary_symbol(c: char) -> Option<Command> {
        match c {
            '+' => Some(Command::Add),
            '-' => Some(Command::Sub),
            '*' => Some(Command::Mul),
            '/' => Some(Command::Div),
            '&' => Some(Command::And),
            '|' => Some(Command::Or),
            '<' => Some(Command::Lt),
            '>' => Some(Command::Gt),
            '=' => Some(Command::Eq),
            _ => None,
        }
    }

    pub fn from_unary_symbol(c: char) -> Option<Command> {
        match c {
            '-' => Some(Command::Neg),
            '~' => Some(Command::Not),
            _ => None,
        }
    }

    fn runtime_routine(self) -> Option<&'static str> {
        match self {
            Command::Mul => Some(MULTIPLY),
            Command::Div => Some(DIVIDE),
            _ => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Command::Add => "add",
            Command::Sub => "sub",
            Command::Neg => "neg",
            Command::Eq => "eq",
            Command::Gt => "gt",
            Command::Lt => "lt",
            Command::And => "and",
            Command::Or => "or",
            Command::Not => "not",
            Command::Mul => "mul",
            Command::Div => "div",
        };
        f.write_str(s)
    }
}

pub const MULTIPLY: &str = "Math.multiply";
pub const DIVIDE: &str = "Math.divide";
pub const ALLOC: &str = "Memory.alloc";
pub const STRING_NEW: &str = "String.new";
pub const STRING_APPEND_CHAR: &str = "String.appendChar";

/// Append-only text sink, one instruction per line.
#[derive(Debug, Default)]
pub struct VmWriter {
    out: String,
}

impl VmWriter {
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    fn emit(&mut self, line: fmt::Arguments<'_>) {
        self.out.push_str(&line.to_string());
        self.out.push('\n');
    }

    pub fn write_push(&mut self, segment: Segment, index: usize) {
        self.emit(format_args!("push {} {}", segment, index));
    }

    pub fn write_pop(&mut self, segment: Segment, index: usize) {
        self.emit(format_args!("pop {} {}", segment, index));
    }

    pub fn write_arithmetic(&mut self, command: Command) {
        match command.runtime_routine() {
            Some(routine) => self.write_call(routine, 2),
            None => self.emit(format_args!("{}", command)),
        }
    }

    pub fn write_label(&mut self, label: &str) {
        self.emit(format_args!("label {}", label));
    }

    pub fn write_goto(&mut self, label: &str) {
        self.emit(format_args!("goto {}", label));
    }

    pub fn write_if(&mut self, label: &str) {
        self.emit(format_args!("if-goto {}", label));
    }

    pub fn write_call(&mut self, name: &str, n_args: usize) {
        self.emit(format_args!("call {} {}", name, n_args));
    }

    pub fn write_function(&mut self, name: &str, n_locals: usize) {
        self.emit(format_args!("function {} {}", name, n_locals));
    }

    pub fn write_return(&mut self) {
        self.emit(format_args!("return"));
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> String {
        self.out
    }
}
