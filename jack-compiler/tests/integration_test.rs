//! Integration tests for the Jack Compiler.
//!
//! Exercises full Jack programs end to end: tokenize, parse, generate VM
//! code, and verify the emitted instruction sequences.

use jack_compiler::{compile_directory, compile_source};
use std::fs;

// =============================================================================
// Test 1: Seven - arithmetic and a function call
// =============================================================================

#[test]
fn test_seven() {
    let source = r#"
class Main {
    function void main() {
        do Output.printInt(1 + (2 * 3));
        return;
    }
}
"#;

    let result = compile_source(source, "Main");
    assert!(
        result.is_ok(),
        "Seven compilation failed: {:?}",
        result.errors
    );

    let vm = &result.vm_code;
    assert!(vm.contains("function Main.main 0"));
    assert!(vm.contains("push constant 1"));
    assert!(vm.contains("push constant 2"));
    assert!(vm.contains("push constant 3"));
    assert!(vm.contains("call Math.multiply 2"));
    assert!(vm.contains("add"));
    assert!(vm.contains("call Output.printInt 1"));
    assert!(vm.contains("push constant 0"));
    assert!(vm.contains("return"));
}

// =============================================================================
// Test 2: ConvertToBin-style procedural code (loops, conditionals)
// =============================================================================

#[test]
fn test_convert_to_bin_while_loop_structure() {
    let source = r#"
class Main {
    function void main() {
        var int value, position;
        let value = 0;
        let position = 0;
        while (position < 16) {
            if (value > 0) {
                do Main.setBit(position);
            }
            let position = position + 1;
        }
        return;
    }

    function void setBit(int position) {
        return;
    }
}
"#;
    let result = compile_source(source, "Main");
    assert!(result.is_ok(), "compilation failed: {:?}", result.errors);
    let vm = &result.vm_code;

    let label_pos = vm.find("label WHILE_EXP0").expect("should have WHILE_EXP0");
    let if_goto_pos = vm
        .find("if-goto WHILE_END0")
        .expect("should have if-goto WHILE_END0");
    let goto_pos = vm.rfind("goto WHILE_EXP0").expect("should have goto back");

    assert!(label_pos < if_goto_pos, "label should precede if-goto");
    assert!(if_goto_pos < goto_pos, "if-goto should precede loopback");
}

// =============================================================================
// Test 3: Square-style OOP (constructors, methods, fields)
// =============================================================================

const SQUARE_SOURCE: &str = r#"
class Square {
    field int x, y, size;

    constructor Square new(int ax, int ay, int asize) {
        let x = ax;
        let y = ay;
        let size = asize;
        return this;
    }

    method void dispose() {
        do Memory.deAlloc(this);
        return;
    }

    method void draw() {
        do Screen.setColor(true);
        do Screen.drawRectangle(x, y, x + size, y + size);
        return;
    }

    method void erase() {
        do Screen.setColor(false);
        do Screen.drawRectangle(x, y, x + size, y + size);
        return;
    }

    method int getSize() {
        return size;
    }
}
"#;

#[test]
fn test_square() {
    let result = compile_source(SQUARE_SOURCE, "Square");
    assert!(result.is_ok(), "compilation failed: {:?}", result.errors);
    let vm = &result.vm_code;

    // Constructor
    assert!(vm.contains("function Square.new 0"));
    assert!(vm.contains("push constant 3"));
    assert!(vm.contains("call Memory.alloc 1"));
    assert!(vm.contains("pop pointer 0"));
    assert!(vm.contains("push pointer 0\nreturn"));

    // Methods set up `this`
    assert!(vm.contains("function Square.draw 0"));
    let method_this_setups = vm.matches("push argument 0\npop pointer 0").count();
    assert!(
        method_this_setups >= 4,
        "expected at least 4 methods to set up `this`, found {}",
        method_this_setups
    );

    // Field access via `this` segment
    assert!(vm.contains("push this 0"));
    assert!(vm.contains("pop this 0"));
}

#[test]
fn test_square_constructor_field_count() {
    let result = compile_source(SQUARE_SOURCE, "Square");
    assert!(result.is_ok());
    assert!(
        result
            .vm_code
            .contains("push constant 3\ncall Memory.alloc 1"),
        "constructor should allocate 3 fields"
    );
}

// =============================================================================
// Test 4: Average-style arrays and strings
// =============================================================================

#[test]
fn test_average_array_and_string() {
    let source = r#"
class Main {
    function void main() {
        var Array a;
        var int i;
        var String s;
        let a = Array.new(3);
        let i = 0;
        let a[i] = Keyboard.readInt("Enter: ");
        let s = "done";
        return;
    }
}
"#;
    let result = compile_source(source, "Main");
    assert!(result.is_ok(), "compilation failed: {:?}", result.errors);
    let vm = &result.vm_code;

    assert!(vm.contains("call Array.new 1"));
    assert!(vm.contains("call Keyboard.readInt 1"));
    assert!(vm.contains("pop pointer 1"));
    assert!(vm.contains("push temp 0"));
    assert!(vm.contains("pop that 0"));
    assert!(vm.contains("call String.new 1"));
    assert!(vm.contains("call String.appendChar 2"));
}

// =============================================================================
// Test 5: static variables across methods
// =============================================================================

#[test]
fn test_static_variable_access() {
    let source = r#"
class PongGame {
    static PongGame instance;

    function PongGame getInstance() {
        return instance;
    }

    function void setInstance(PongGame game) {
        let instance = game;
        return;
    }
}
"#;
    let result = compile_source(source, "PongGame");
    assert!(result.is_ok(), "compilation failed: {:?}", result.errors);
    assert!(result.vm_code.contains("push static 0"));
    assert!(result.vm_code.contains("pop static 0"));
}

// =============================================================================
// Test 6: nested array access
// =============================================================================

#[test]
fn test_nested_array_access() {
    let source = r#"
class Main {
    function void fill(Array a, Array b) {
        let a[b[a[3]]] = 1;
        return;
    }
}
"#;
    let result = compile_source(source, "Main");
    assert!(result.is_ok(), "compilation failed: {:?}", result.errors);
    let vm = &result.vm_code;

    let pointer_1_count = vm.matches("pop pointer 1").count();
    assert!(
        pointer_1_count >= 3,
        "nested array access should dereference multiple times, found {}",
        pointer_1_count
    );
    assert!(vm.contains("pop temp 0"));
}

// =============================================================================
// Error handling
// =============================================================================

#[test]
fn test_undefined_variable_error() {
    let source = r#"
class Main {
    function void main() {
        let x = 5;
        return;
    }
}
"#;

    let result = compile_source(source, "Main");
    assert!(!result.is_ok());
    assert!(
        result
            .errors
            .iter()
            .any(|e| e.to_string().contains("Undefined")),
        "should report undefined variable error"
    );
}

// =============================================================================
// Directory compilation
// =============================================================================

#[test]
fn test_directory_compiles_every_file_independently() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Good.jack"),
        "class Good { function void main() { return; } }",
    )
    .unwrap();
    fs::write(
        dir.path().join("Bad.jack"),
        "class Bad { function void main() { let x = 1; return; } }",
    )
    .unwrap();

    let results = compile_directory(dir.path());
    assert_eq!(results.len(), 2);

    let good = results.iter().find(|r| r.filename == "Good").unwrap();
    let bad = results.iter().find(|r| r.filename == "Bad").unwrap();

    assert!(good.is_ok(), "Good.jack should compile");
    assert!(!bad.is_ok(), "Bad.jack should fail");
}

#[test]
fn test_directory_skips_non_jack_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Main.jack"),
        "class Main { function void main() { return; } }",
    )
    .unwrap();
    fs::write(dir.path().join("readme.txt"), "not jack source").unwrap();

    let results = compile_directory(dir.path());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].filename, "Main");
}

#[test]
fn test_directory_with_no_jack_files_returns_empty() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("readme.txt"), "nothing here").unwrap();

    let results = compile_directory(dir.path());
    assert!(results.is_empty());
}
