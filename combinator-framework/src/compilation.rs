use crate::context::ParseContext;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A single compiled statement, executed against a parse context.
pub type Stmt = Box<dyn Fn(&mut ParseContext)>;

/// Compile-time state for one compilation pass.
///
/// Owns the monotonic counter producing collision-free symbol names across
/// nested fragments, and the discard-result flag. The context is threaded by
/// reference through every build call in build order; it is never global, so
/// independent passes cannot interfere with each other.
pub struct CompilationContext {
    counter: usize,
    discard_result: bool,
    allocated: Vec<String>,
}

impl CompilationContext {
    pub fn new() -> Self {
        Self {
            counter: 0,
            discard_result: false,
            allocated: Vec::new(),
        }
    }

    /// Returns the next fragment id. Ids are never reused within a pass;
    /// the success and value symbols of one fragment share an id, the way
    /// their declarations appear side by side in emitted code.
    pub fn next_id(&mut self) -> usize {
        self.counter += 1;
        self.counter
    }

    /// Declares a success flag named after the given fragment id.
    pub fn declare_flag(&mut self, id: usize) -> Flag {
        let name = format!("success{id}");
        tracing::trace!(symbol = %name, "declared symbol");
        self.allocated.push(name.clone());
        Flag::new(name)
    }

    /// Declares a default-initialized value slot named after the given
    /// fragment id.
    pub fn declare_slot<T: Default>(&mut self, id: usize) -> Slot<T> {
        let name = format!("value{id}");
        tracing::trace!(symbol = %name, "declared symbol");
        self.allocated.push(name.clone());
        Slot::new(name, T::default())
    }

    /// Whether the unit being compiled may skip value materialization.
    /// Position advancement and the success flag are never skipped.
    pub fn discard_result(&self) -> bool {
        self.discard_result
    }

    pub fn set_discard_result(&mut self, discard: bool) {
        self.discard_result = discard;
    }

    /// Runs `f` with the discard flag set to `discard`, restoring the
    /// previous setting afterwards. A combinator may discard a sub-unit's
    /// value even when its own caller wants one, so the flag behaves as a
    /// scoped toggle rather than a one-way switch.
    pub fn discarding<R>(&mut self, discard: bool, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = self.discard_result;
        self.discard_result = discard;
        let out = f(self);
        self.discard_result = previous;
        out
    }

    /// Every symbol name handed out during this pass, in allocation order.
    pub fn allocated_symbols(&self) -> &[String] {
        &self.allocated
    }
}

impl Default for CompilationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A named boolean symbol: a fragment's success flag.
///
/// The cell is shared between the fragment that declares it and the parent
/// fragment that reads it, mirroring how an enclosing scope reads a nested
/// declaration in emitted code.
#[derive(Clone)]
pub struct Flag {
    name: Rc<str>,
    cell: Rc<Cell<bool>>,
}

impl Flag {
    pub fn new(name: String) -> Self {
        Self {
            name: Rc::from(name),
            cell: Rc::new(Cell::new(false)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self) -> bool {
        self.cell.get()
    }

    pub fn set(&self, value: bool) {
        self.cell.set(value);
    }
}

impl std::fmt::Debug for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Flag")
            .field("name", &self.name)
            .field("value", &self.cell.get())
            .finish()
    }
}

/// A named typed symbol: a fragment's value slot.
///
/// Declared only when the discard flag was unset at build time, and holds
/// the type's default value on every path where no unit has assigned it.
pub struct Slot<T> {
    name: Rc<str>,
    cell: Rc<RefCell<T>>,
}

impl<T> Slot<T> {
    pub fn new(name: String, initial: T) -> Self {
        Self {
            name: Rc::from(name),
            cell: Rc::new(RefCell::new(initial)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set(&self, value: T) {
        *self.cell.borrow_mut() = value;
    }
}

impl<T: Clone> Slot<T> {
    pub fn get(&self) -> T {
        self.cell.borrow().clone()
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            name: Rc::clone(&self.name),
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("name", &self.name)
            .field("value", &self.cell.borrow())
            .finish()
    }
}

/// The compiled, flattened form of one unit's logic.
///
/// A fragment declares a success flag (assigned on every executed path), an
/// optional value slot (assigned on the success path when the discard flag
/// was unset at build time), and an ordered body of statements computing
/// both. Sub-fragments are built first and embedded whole in the parent's
/// body; the parent owns them and reads their flag and slot directly.
pub struct CompiledFragment<T> {
    success: Flag,
    value: Option<Slot<T>>,
    declarations: Vec<String>,
    body: Vec<Stmt>,
}

impl<T> CompiledFragment<T> {
    /// Creates a fragment around its declared symbols.
    pub fn new(success: Flag, value: Option<Slot<T>>) -> Self {
        let mut declarations = vec![success.name().to_string()];
        if let Some(slot) = &value {
            declarations.push(slot.name().to_string());
        }
        Self {
            success,
            value,
            declarations,
            body: Vec::new(),
        }
    }

    /// The success flag, assigned on every executed path of the body.
    pub fn success(&self) -> &Flag {
        &self.success
    }

    /// The value slot, absent when the fragment was built discarding.
    pub fn value(&self) -> Option<&Slot<T>> {
        self.value.as_ref()
    }

    /// Symbol names declared at this fragment's own scope.
    pub fn declarations(&self) -> &[String] {
        &self.declarations
    }

    /// Appends a statement to the body.
    pub fn push(&mut self, stmt: Stmt) {
        self.body.push(stmt);
    }

    /// Executes the body statements in order against the given context.
    pub fn run_body(&self, ctx: &mut ParseContext) {
        for stmt in &self.body {
            stmt(ctx);
        }
    }
}

impl<T> std::fmt::Debug for CompiledFragment<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledFragment")
            .field("declarations", &self.declarations)
            .field("statements", &self.body.len())
            .finish()
    }
}
