//! Program loading and machine reset.

use chip8vm_core::{
    Chip8Error, Chip8Interpreter, Instruction, SilentBeeper, FONT, MAX_PROGRAM_SIZE,
};
use rand::rngs::mock::StepRng;

fn setup() -> Chip8Interpreter<StepRng, SilentBeeper> {
    Chip8Interpreter::new(StepRng::new(0, 0), SilentBeeper)
}

#[test]
fn test_program_one_byte_too_large_is_rejected() {
    let mut chip8 = setup();
    let err = chip8.load_program(&vec![0xAA; 3585]).unwrap_err();
    assert_eq!(
        err,
        Chip8Error::RomTooLarge {
            size: 3585,
            max: 3584
        }
    );
}

#[test]
fn test_program_filling_memory_exactly_is_accepted() {
    let mut chip8 = setup();
    chip8.load_program(&vec![0xAA; MAX_PROGRAM_SIZE]).unwrap();
    assert_eq!(chip8.state.ram[0x200], 0xAA);
    assert_eq!(chip8.state.ram[0xFFF], 0xAA);
}

#[test]
fn test_rejected_program_leaves_state_untouched() {
    let mut chip8 = setup();
    chip8.load_program(&[0x60, 0x05]).unwrap();
    chip8.cycle().unwrap();
    chip8.state.delay_timer = 9;

    assert!(chip8.load_program(&vec![0; 4000]).is_err());

    assert_eq!(chip8.state.register(0), 0x05);
    assert_eq!(chip8.state.program_counter, 0x202);
    assert_eq!(chip8.state.delay_timer, 9);
    assert_eq!(&chip8.state.ram[0x200..0x202], &[0x60, 0x05]);
}

#[test]
fn test_load_resets_every_mutable_field() {
    let mut chip8 = setup();
    chip8.state.data_registers = [0x7F; 16];
    chip8.state.program_counter = 0x456;
    chip8.state.index_register = 0x321;
    chip8.state.stack_pointer = 3;
    chip8.state.stack[3] = 0x222;
    chip8.state.delay_timer = 10;
    chip8.state.sound_timer = 20;
    chip8.state.display.draw(0, 0, &[0xFF; 8]);
    chip8.state.ram[3] = 0x00;

    chip8.load_program(&[0x12, 0x00]).unwrap();

    assert_eq!(chip8.state.program_counter, 0x200);
    assert_eq!(chip8.state.data_registers, [0; 16]);
    assert_eq!(chip8.state.index_register, 0);
    assert_eq!(chip8.state.stack_pointer, 0);
    assert_eq!(chip8.state.stack, [0; 16]);
    assert_eq!(chip8.state.delay_timer, 0);
    assert_eq!(chip8.state.sound_timer, 0);
    assert!(chip8.display().is_blank());
    assert_eq!(&chip8.state.ram[..FONT.len()], &FONT[..]);
    assert_eq!(chip8.state.fetch(), Instruction::decode(0x1200));
}

#[test]
fn test_instances_do_not_share_state() {
    let mut a = setup();
    let mut b = setup();
    a.load_program(&[0x61, 0x11]).unwrap();
    b.load_program(&[0x61, 0x22]).unwrap();

    a.cycle().unwrap();
    b.cycle().unwrap();

    assert_eq!(a.state.register(1), 0x11);
    assert_eq!(b.state.register(1), 0x22);
}

#[test]
fn test_instances_run_on_separate_threads() {
    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            std::thread::spawn(move || {
                let mut chip8 = setup();
                chip8.load_program(&[0x60, i, 0x70, 0x01]).unwrap();
                chip8.cycle().unwrap();
                chip8.cycle().unwrap();
                chip8.state.register(0)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), i as u8 + 1);
    }
}

#[test]
fn test_reset_restarts_loaded_program() {
    let mut chip8 = setup();
    chip8.load_program(&[0x60, 0x2A, 0x12, 0x02]).unwrap();
    chip8.cycle().unwrap();
    chip8.cycle().unwrap();
    chip8.keypad_mut().press(0x1);

    chip8.reset();

    assert_eq!(chip8.state.program_counter, 0x200);
    assert_eq!(chip8.state.register(0), 0);
    assert!(chip8.state.keypad.is_key_down(0x1));
    chip8.cycle().unwrap();
    assert_eq!(chip8.state.register(0), 0x2A);
}
