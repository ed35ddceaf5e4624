//! The two-pass backpatching byte emitter.
//!
//! Pass one walks the AST once, emitting code bytes and recording a
//! placeholder wherever a value can't be known yet — a variable's absolute
//! address depends on the heap's base, which is itself the code's final
//! length and so isn't known until the whole program has been emitted; a
//! string's address additionally depends on the heap's final size. Pass two
//! computes both bases and sweeps the recorded placeholders, patching each
//! one with its resolved address.
use std::collections::HashMap;

use alanpp_sem::{AstKind, AstNode};
use alanpp_util::{DiagnosticBuilder, DiagnosticCode, Handler, Span, Stage, Symbol};

use crate::opcode::Opcode;

/// Image byte budget. Exceeding it is not fatal — the image is still
/// emitted and runnable — but worth a warning.
const MAX_IMAGE_SIZE: usize = 256;

/// The address comparisons and int sums use for their scratch byte, per the
/// two-operand example worked through in full elsewhere. Nested evaluation
/// (a sum or comparison whose own operand is itself composite) reserves
/// further cells above this one rather than reusing it while it's still
/// live — see [`Emitter::alloc_scratch`].
const SCRATCH_BASE: u16 = 0x0000;

/// A compiled byte image: the code region (ending in `BRK`, padded to an
/// eight-byte boundary) plus the string literal region that follows it in
/// the file. The string region's *runtime* address is
/// `code.len() as u16 + heap_size`, not its file offset — the heap in
/// between exists only as reserved, zero-initialized memory and has no
/// bytes of its own in the file.
#[derive(Debug, Clone)]
pub struct Image {
    pub code: Vec<u8>,
    pub strings: Vec<u8>,
    pub heap_size: u16,
}

impl Image {
    /// The bytes actually written to a `.bin` file: code followed directly
    /// by the string region, with no heap bytes in between.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.code.clone();
        out.extend_from_slice(&self.strings);
        out
    }

    pub fn len(&self) -> usize {
        self.code.len() + self.strings.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum PlaceholderKey {
    /// Offset of a variable's slot relative to the heap's base address.
    Var(u16),
    /// Offset of a string's first byte relative to the string region's base.
    Str(u16),
}

/// How many bytes of `code`, starting at the recorded offset, a placeholder
/// occupies, and which half of a resolved 16-bit address it wants —
/// `Addr16` operands (an `STA`/`LDA`/... address) get both bytes in one
/// shot; a string's address stored into a variable's two heap bytes has to
/// go through two separate single-byte `LDA_CONST` immediates instead, since
/// this instruction set has no way to move a computed 16-bit value except
/// one byte at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatchKind {
    Addr16,
    Lo,
    Hi,
}

struct VarSlot {
    offset: u16,
}

/// Emits one program's AST into a byte [`Image`]. `E_CODEGEN_*` diagnostics
/// are fatal for that program — the in-progress buffer is discarded and
/// [`Emitter::emit_program`] returns `None` — while
/// `W_CODEGEN_IMAGE_TOO_LARGE` is not: the oversized image is still
/// returned.
pub struct Emitter<'a> {
    handler: &'a Handler,
    code: Vec<u8>,
    placeholders: Vec<(usize, PlaceholderKey, PatchKind)>,
    strings: Vec<Vec<u8>>,
    next_string_offset: u16,
    scopes: Vec<HashMap<Symbol, VarSlot>>,
    next_var_offset: u16,
    scratch_depth: u16,
    failed: bool,
}

impl<'a> Emitter<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        Self {
            handler,
            code: Vec::new(),
            placeholders: Vec::new(),
            strings: Vec::new(),
            next_string_offset: 0,
            scopes: vec![HashMap::new()],
            next_var_offset: 0,
            scratch_depth: 0,
            failed: false,
        }
    }

    /// Emits `program` (an `AstKind::Program` node wrapping a single
    /// `Block`) and returns the finished image, or `None` if a fatal
    /// codegen error was raised along the way.
    pub fn emit_program(mut self, program: &AstNode) -> Option<Image> {
        let block = &program.children[0];
        self.emit_block(block);
        if self.failed {
            return None;
        }

        self.code.push(Opcode::Brk.byte());
        while self.code.len() % 8 != 0 {
            self.code.push(0x00);
        }

        let heap_base = self.code.len() as u16;
        let heap_size = self.next_var_offset;
        let string_base = heap_base.wrapping_add(heap_size);

        for (offset, key, kind) in &self.placeholders {
            let addr = match key {
                PlaceholderKey::Var(rel) => heap_base.wrapping_add(*rel),
                PlaceholderKey::Str(rel) => string_base.wrapping_add(*rel),
            };
            match kind {
                PatchKind::Addr16 => {
                    let [lo, hi] = addr.to_le_bytes();
                    self.code[*offset] = lo;
                    self.code[offset + 1] = hi;
                }
                PatchKind::Lo => self.code[*offset] = addr.to_le_bytes()[0],
                PatchKind::Hi => self.code[*offset] = addr.to_le_bytes()[1],
            }
        }

        let mut strings = Vec::new();
        for s in &self.strings {
            strings.extend_from_slice(s);
            strings.push(0x00);
        }

        let image = Image {
            code: self.code,
            strings,
            heap_size,
        };

        if image.len() > MAX_IMAGE_SIZE {
            DiagnosticBuilder::warning(format!(
                "emitted image is {} bytes, over the {MAX_IMAGE_SIZE}-byte budget",
                image.len()
            ))
            .code(DiagnosticCode::W_CODEGEN_IMAGE_TOO_LARGE)
            .stage(Stage::Codegen)
            .span(Span::point(program.line, program.column))
            .emit(self.handler);
        }

        Some(image)
    }

    fn fatal(&mut self, code: DiagnosticCode, line: u32, column: u32, message: impl Into<String>) {
        DiagnosticBuilder::error(message)
            .code(code)
            .stage(Stage::Codegen)
            .span(Span::point(line, column))
            .emit(self.handler);
        self.failed = true;
    }

    // --- scope handling -----------------------------------------------

    fn declare_var(&mut self, name: Symbol) -> u16 {
        let offset = self.next_var_offset;
        self.next_var_offset += 2;
        self.scopes
            .last_mut()
            .expect("at least one scope always open")
            .insert(name, VarSlot { offset });
        offset
    }

    fn resolve_var(&self, name: Symbol) -> Option<u16> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&name).map(|slot| slot.offset))
    }

    /// Reserves the next scratch cell up from [`SCRATCH_BASE`] and returns
    /// its address; cells are two bytes wide so a caller needing a pair of
    /// adjacent bytes (a string pointer's low/high halves) can use `addr`
    /// and `addr + 1` without colliding with the next nesting level's cell
    /// at `addr + 2`.
    fn alloc_scratch(&mut self) -> u16 {
        let addr = SCRATCH_BASE + self.scratch_depth * 2;
        self.scratch_depth += 1;
        addr
    }

    fn free_scratch(&mut self) {
        self.scratch_depth -= 1;
    }

    // --- raw byte emission ---------------------------------------------

    fn here(&self) -> usize {
        self.code.len()
    }

    fn emit_opcode(&mut self, op: Opcode) {
        self.code.push(op.byte());
    }

    fn emit_imm8(&mut self, value: u8) {
        self.code.push(value);
    }

    /// Writes two zero bytes as a placeholder and records `key` so the
    /// second pass can patch them once its address is known.
    fn emit_addr_placeholder(&mut self, key: PlaceholderKey) {
        let offset = self.here();
        self.code.push(0x00);
        self.code.push(0x00);
        self.placeholders.push((offset, key, PatchKind::Addr16));
    }

    /// Writes one zero byte as an immediate-operand placeholder for one half
    /// (`kind`) of `key`'s eventual address.
    fn emit_imm8_placeholder(&mut self, key: PlaceholderKey, kind: PatchKind) {
        let offset = self.here();
        self.code.push(0x00);
        self.placeholders.push((offset, key, kind));
    }

    /// An address that is already fully known at emission time (the fixed
    /// scratch cells) — written directly, no placeholder needed.
    fn emit_addr_literal(&mut self, addr: u16) {
        let [lo, hi] = addr.to_le_bytes();
        self.code.push(lo);
        self.code.push(hi);
    }

    /// Reserves one relative-branch operand byte, returning its offset for
    /// a later [`Emitter::patch_rel8`].
    fn emit_rel8_placeholder(&mut self) -> usize {
        let offset = self.here();
        self.code.push(0x00);
        offset
    }

    fn patch_rel8(&mut self, offset: usize, displacement: i32, line: u32, column: u32) {
        match i8::try_from(displacement) {
            Ok(rel) => self.code[offset] = rel as u8,
            Err(_) => self.fatal(
                DiagnosticCode::E_CODEGEN_BRANCH_OUT_OF_RANGE,
                line,
                column,
                format!("branch displacement {displacement} does not fit in a signed byte"),
            ),
        }
    }

    fn addr_of_var(&mut self, name: Symbol, line: u32, column: u32) -> Option<u16> {
        match self.resolve_var(name) {
            Some(offset) => Some(offset),
            None => {
                self.fatal(
                    DiagnosticCode::E_CODEGEN_UNRESOLVED_ADDRESS,
                    line,
                    column,
                    format!("no address on record for '{name}' (should have been caught earlier)"),
                );
                None
            }
        }
    }

    fn intern_string(&mut self, string_expr: &AstNode) -> u16 {
        let bytes: Vec<u8> = string_expr
            .children
            .iter()
            .filter_map(|c| c.value.as_deref())
            .flat_map(|s| s.bytes())
            .collect();
        self.intern_raw_string(&bytes)
    }

    fn intern_raw_string(&mut self, bytes: &[u8]) -> u16 {
        let offset = self.next_string_offset;
        self.next_string_offset += bytes.len() as u16 + 1;
        self.strings.push(bytes.to_vec());
        offset
    }

    // --- statements ------------------------------------------------------

    fn emit_block(&mut self, block: &AstNode) {
        self.scopes.push(HashMap::new());
        for stmt in &block.children {
            if self.failed {
                break;
            }
            self.emit_statement(stmt);
        }
        self.scopes.pop();
    }

    fn emit_statement(&mut self, stmt: &AstNode) {
        match stmt.kind {
            AstKind::VarDecl => self.emit_var_decl(stmt),
            AstKind::Assignment => self.emit_assignment(stmt),
            AstKind::Print => self.emit_print(stmt),
            AstKind::If => self.emit_if(stmt),
            AstKind::While => self.emit_while(stmt),
            AstKind::Block => self.emit_block(stmt),
            other => unreachable!("{other:?} is not a statement kind"),
        }
    }

    /// Assigns the new variable's heap slot (cheap: just the next free
    /// offset, known immediately) and zero-initializes its first byte.
    fn emit_var_decl(&mut self, decl: &AstNode) {
        let id = &decl.children[0];
        let name = Symbol::intern(id.value.as_deref().unwrap_or_default());
        let offset = self.declare_var(name);

        self.emit_opcode(Opcode::LdaConst);
        self.emit_imm8(0x00);
        self.emit_opcode(Opcode::Sta);
        self.emit_addr_placeholder(PlaceholderKey::Var(offset));
    }

    fn emit_assignment(&mut self, assign: &AstNode) {
        let id = &assign.children[0];
        let name = Symbol::intern(id.value.as_deref().unwrap_or_default());
        let expr = &assign.children[1];
        let Some(offset) = self.addr_of_var(name, assign.line, assign.column) else {
            return;
        };

        if expr.kind == AstKind::StringExpr {
            let str_offset = self.intern_string(expr);
            self.emit_store_string_address(offset, str_offset);
            return;
        }

        self.emit_value_into_a(expr);
        self.emit_opcode(Opcode::Sta);
        self.emit_addr_placeholder(PlaceholderKey::Var(offset));
    }

    /// Writes a string's two-byte address into `var_offset`/`var_offset+1`,
    /// one byte at a time — `LDA_CONST` can only ever carry a single
    /// immediate byte, so the low and high halves of the (not yet resolved)
    /// string address each get their own placeholder.
    fn emit_store_string_address(&mut self, var_offset: u16, str_offset: u16) {
        self.emit_opcode(Opcode::LdaConst);
        self.emit_imm8_placeholder(PlaceholderKey::Str(str_offset), PatchKind::Lo);
        self.emit_opcode(Opcode::Sta);
        self.emit_addr_placeholder(PlaceholderKey::Var(var_offset));

        self.emit_opcode(Opcode::LdaConst);
        self.emit_imm8_placeholder(PlaceholderKey::Str(str_offset), PatchKind::Hi);
        self.emit_opcode(Opcode::Sta);
        self.emit_addr_placeholder(PlaceholderKey::Var(var_offset + 1));
    }

    /// `print`'s sole argument dispatches on its static shape: a string (or
    /// a boolean, rendered as the literal text `"true"`/`"false"`) goes out
    /// through `SYS`'s string mode; anything else is an int-valued
    /// expression that goes out through `SYS`'s integer mode.
    fn emit_print(&mut self, print: &AstNode) {
        let expr = &print.children[0];
        match expr.kind {
            AstKind::StringExpr => {
                let str_offset = self.intern_string(expr);
                self.emit_print_string_pointer(str_offset);
            }
            AstKind::BoolVal => {
                let text = print_bool_literal(expr.value.as_deref());
                let str_offset = self.intern_raw_string(text.as_bytes());
                self.emit_print_string_pointer(str_offset);
            }
            AstKind::BoolExpr if expr.children.len() == 1 => {
                let text = print_bool_literal(expr.children[0].value.as_deref());
                let str_offset = self.intern_raw_string(text.as_bytes());
                self.emit_print_string_pointer(str_offset);
            }
            _ => {
                self.emit_value_into_a(expr);
                let scratch = self.alloc_scratch();
                self.emit_opcode(Opcode::Sta);
                self.emit_addr_literal(scratch);
                self.emit_opcode(Opcode::LdyMem);
                self.emit_addr_literal(scratch);
                self.free_scratch();
                self.emit_opcode(Opcode::LdxConst);
                self.emit_imm8(1);
                self.emit_opcode(Opcode::Sys);
            }
        }
    }

    /// Loads a string's address into the two-byte scratch cell `SYS`'s
    /// string mode reads its pointer from, then invokes it.
    fn emit_print_string_pointer(&mut self, str_offset: u16) {
        let scratch = self.alloc_scratch();
        self.emit_opcode(Opcode::LdaConst);
        self.emit_imm8_placeholder(PlaceholderKey::Str(str_offset), PatchKind::Lo);
        self.emit_opcode(Opcode::Sta);
        self.emit_addr_literal(scratch);
        self.emit_opcode(Opcode::LdaConst);
        self.emit_imm8_placeholder(PlaceholderKey::Str(str_offset), PatchKind::Hi);
        self.emit_opcode(Opcode::Sta);
        self.emit_addr_literal(scratch + 1);
        self.free_scratch();
        self.emit_opcode(Opcode::LdyMem);
        self.emit_addr_literal(scratch);
        self.emit_opcode(Opcode::LdxConst);
        self.emit_imm8(2);
        self.emit_opcode(Opcode::Sys);
    }

    fn emit_if(&mut self, node: &AstNode) {
        let cond = &node.children[0];
        let body = &node.children[1];

        self.emit_condition_into_scratch(cond);
        self.emit_opcode(Opcode::LdxConst);
        self.emit_imm8(0x01);
        self.emit_opcode(Opcode::Cpx);
        self.emit_addr_literal(SCRATCH_BASE);
        self.emit_opcode(Opcode::Bne);
        let skip_fixup = self.emit_rel8_placeholder();

        let body_start = self.here();
        self.emit_block(body);
        let body_len = (self.here() - body_start) as i32;
        self.patch_rel8(skip_fixup, body_len, node.line, node.column);
    }

    /// `loop_start` is remembered before the condition so the trailing
    /// unconditional branch can jump all the way back to re-evaluate it.
    fn emit_while(&mut self, node: &AstNode) {
        let cond = &node.children[0];
        let body = &node.children[1];

        let loop_start = self.here();
        self.emit_condition_into_scratch(cond);
        self.emit_opcode(Opcode::LdxConst);
        self.emit_imm8(0x01);
        self.emit_opcode(Opcode::Cpx);
        self.emit_addr_literal(SCRATCH_BASE);
        self.emit_opcode(Opcode::Bne);
        let skip_fixup = self.emit_rel8_placeholder();

        self.emit_block(body);

        // A=1, X=0 guarantees CPX never matches, so this BNE always taken.
        self.emit_opcode(Opcode::LdaConst);
        self.emit_imm8(0x01);
        self.emit_opcode(Opcode::LdxConst);
        self.emit_imm8(0x00);
        self.emit_opcode(Opcode::Sta);
        self.emit_addr_literal(SCRATCH_BASE);
        self.emit_opcode(Opcode::Cpx);
        self.emit_addr_literal(SCRATCH_BASE);
        self.emit_opcode(Opcode::Bne);
        let back_fixup = self.emit_rel8_placeholder();
        let back_landing = self.here();
        self.patch_rel8(
            back_fixup,
            loop_start as i32 - back_landing as i32,
            node.line,
            node.column,
        );

        let skip_landing = self.here();
        self.patch_rel8(
            skip_fixup,
            skip_landing as i32 - (skip_fixup as i32 + 1),
            node.line,
            node.column,
        );
    }

    // --- expressions ------------------------------------------------------

    /// Loads an int- or bool-valued expression's result into `A`.
    fn emit_value_into_a(&mut self, expr: &AstNode) {
        match expr.kind {
            AstKind::Digit => {
                let n: u8 = expr.value.as_deref().unwrap_or("0").parse().unwrap_or(0);
                self.emit_opcode(Opcode::LdaConst);
                self.emit_imm8(n);
            }
            AstKind::IntExpr if expr.children.len() == 1 => {
                self.emit_value_into_a(&expr.children[0]);
            }
            AstKind::IntExpr => {
                let scratch = self.alloc_scratch();
                self.emit_value_into_a(&expr.children[0]);
                self.emit_opcode(Opcode::Sta);
                self.emit_addr_literal(scratch);
                self.emit_value_into_a(&expr.children[1]);
                self.emit_opcode(Opcode::Adc);
                self.emit_addr_literal(scratch);
                self.free_scratch();
            }
            AstKind::BoolVal => {
                let v = u8::from(expr.value.as_deref() == Some("true"));
                self.emit_opcode(Opcode::LdaConst);
                self.emit_imm8(v);
            }
            AstKind::BoolExpr if expr.children.len() == 1 => {
                self.emit_value_into_a(&expr.children[0]);
            }
            AstKind::BoolExpr => {
                let scratch = self.alloc_scratch();
                self.emit_comparison_into(expr, scratch);
                self.emit_opcode(Opcode::LdaMem);
                self.emit_addr_literal(scratch);
                self.free_scratch();
            }
            AstKind::Id => {
                let name = Symbol::intern(expr.value.as_deref().unwrap_or_default());
                if let Some(offset) = self.addr_of_var(name, expr.line, expr.column) {
                    self.emit_opcode(Opcode::LdaMem);
                    self.emit_addr_placeholder(PlaceholderKey::Var(offset));
                }
            }
            other => unreachable!("{other:?} has no int/bool value to load into A"),
        }
    }

    /// Loads an expression's value into `X`, for use as a comparison
    /// operand. Digits, identifiers, and bare booleans load directly;
    /// anything composite is evaluated into `A` first and copied through a
    /// scratch cell, since the instruction set has no register-to-register
    /// transfer.
    fn emit_value_into_x(&mut self, expr: &AstNode) {
        match expr.kind {
            AstKind::Digit => {
                let n: u8 = expr.value.as_deref().unwrap_or("0").parse().unwrap_or(0);
                self.emit_opcode(Opcode::LdxConst);
                self.emit_imm8(n);
            }
            AstKind::BoolVal => {
                let v = u8::from(expr.value.as_deref() == Some("true"));
                self.emit_opcode(Opcode::LdxConst);
                self.emit_imm8(v);
            }
            AstKind::Id => {
                let name = Symbol::intern(expr.value.as_deref().unwrap_or_default());
                if let Some(offset) = self.addr_of_var(name, expr.line, expr.column) {
                    self.emit_opcode(Opcode::LdxMem);
                    self.emit_addr_placeholder(PlaceholderKey::Var(offset));
                }
            }
            _ => {
                let scratch = self.alloc_scratch();
                self.emit_value_into_a(expr);
                self.emit_opcode(Opcode::Sta);
                self.emit_addr_literal(scratch);
                self.emit_opcode(Opcode::LdxMem);
                self.emit_addr_literal(scratch);
                self.free_scratch();
            }
        }
    }

    /// `X ← left; A ← right; STA dst; CPX dst` — sets `Z` when the two
    /// operands are equal — then synthesizes `0`/`1` into `dst` itself:
    /// `==` wants `1` when equal (`Z=1`, the `BNE` below not taken), `!=`
    /// inverts both constants.
    fn emit_comparison_into(&mut self, bool_expr: &AstNode, dst: u16) {
        let op = bool_expr.value.as_deref().unwrap_or("==");
        let left = &bool_expr.children[0];
        let right = &bool_expr.children[1];

        self.emit_value_into_x(left);
        self.emit_value_into_a(right);
        self.emit_opcode(Opcode::Sta);
        self.emit_addr_literal(dst);
        self.emit_opcode(Opcode::Cpx);
        self.emit_addr_literal(dst);

        let (when_not_taken, when_taken) = if op == "==" { (0u8, 1u8) } else { (1u8, 0u8) };
        self.emit_opcode(Opcode::LdaConst);
        self.emit_imm8(when_not_taken);
        self.emit_opcode(Opcode::Bne);
        let fixup = self.emit_rel8_placeholder();
        let set_true_start = self.here();
        self.emit_opcode(Opcode::LdaConst);
        self.emit_imm8(when_taken);
        let displacement = (self.here() - set_true_start) as i32;
        self.patch_rel8(fixup, displacement, bool_expr.line, bool_expr.column);
        self.emit_opcode(Opcode::Sta);
        self.emit_addr_literal(dst);
    }

    /// Evaluates a condition (binary `BoolExpr` or bare `BOOLVAL`) so that
    /// `mem[SCRATCH_BASE]` holds `0`/`1` afterward — the fixed address every
    /// `If`/`While` preamble compares `X` against.
    fn emit_condition_into_scratch(&mut self, cond: &AstNode) {
        if cond.children.len() == 1 {
            self.emit_value_into_a(&cond.children[0]);
            self.emit_opcode(Opcode::Sta);
            self.emit_addr_literal(SCRATCH_BASE);
        } else {
            self.emit_comparison_into(cond, SCRATCH_BASE);
        }
    }
}

fn print_bool_literal(value: Option<&str>) -> &'static str {
    if value == Some("true") {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alanpp_par::Parser;
    use alanpp_util::Handler;

    fn emit_source(src: &str) -> (Option<Image>, Handler) {
        let handler = Handler::new();
        let mut parser = Parser::from_source(src, &handler);
        let cst = parser
            .parse_program()
            .expect("all sources used in these tests are syntactically valid");
        let ast = alanpp_sem::analyze(&cst, &handler);
        let image = Emitter::new(&handler).emit_program(&ast);
        (image, handler)
    }

    #[test]
    fn hello_world_ends_in_a_print_and_a_brk() {
        let (image, handler) = emit_source("{print(\"hello\")}$");
        assert!(!handler.has_errors());
        let image = image.expect("no fatal codegen error");
        assert!(image.code.contains(&Opcode::Sys.byte()));
        assert_eq!(image.strings, b"hello\0");
    }

    #[test]
    fn arithmetic_assignment_stores_the_summed_value() {
        let (image, handler) = emit_source("{int a a=1+2 print(a)}$");
        assert!(!handler.has_errors());
        let image = image.expect("no fatal codegen error");
        // LDA# 1; STA <a>; LDA# 2; ADC 0000; STA <a>
        let needle = [0xA9, 0x01, 0x8D, 0x00, 0x00, 0xA9, 0x02, 0x6D, 0x00, 0x00, 0x8D];
        assert!(
            image.code.windows(needle.len()).any(|w| w == needle),
            "expected the additive-assignment sequence in {:02X?}",
            image.code
        );
    }

    #[test]
    fn while_loop_contains_a_forward_and_a_backward_branch() {
        let (image, handler) = emit_source("{int a a=0 while(a!=3){print(a) a=1+a}}$");
        assert!(!handler.has_errors());
        let image = image.expect("no fatal codegen error");
        let bne_count = image.code.iter().filter(|&&b| b == Opcode::Bne.byte()).count();
        assert!(bne_count >= 2, "expected at least a forward and backward BNE");
    }

    #[test]
    fn shadowed_variables_get_distinct_heap_slots() {
        let (image, handler) =
            emit_source("{int x x=1 {string x x=\"hi\" print(x)} print(x)}$");
        assert!(!handler.has_errors());
        assert!(image.is_some());
    }

    #[test]
    fn image_under_budget_emits_no_size_warning() {
        let (image, handler) = emit_source("{print(\"hi\")}$");
        assert!(image.is_some());
        assert!(!handler
            .diagnostics()
            .iter()
            .any(|d| d.code == Some(DiagnosticCode::W_CODEGEN_IMAGE_TOO_LARGE)));
    }

    #[test]
    fn a_body_over_127_bytes_is_a_branch_range_error() {
        let body = "print(\"x\")".repeat(10);
        let source = format!("{{while true{{{body}}}}}$");
        let (image, handler) = emit_source(&source);
        assert!(image.is_none());
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.code == Some(DiagnosticCode::E_CODEGEN_BRANCH_OUT_OF_RANGE)));
    }

    #[test]
    fn an_image_over_budget_still_emits_with_a_warning() {
        let source = format!("{{{}}}$", "print(\"x\")".repeat(20));
        let (image, handler) = emit_source(&source);
        assert!(image.is_some());
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.code == Some(DiagnosticCode::W_CODEGEN_IMAGE_TOO_LARGE)));
    }
}
