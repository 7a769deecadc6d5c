//! Transport boundary for bus access.
//!
//! [`Transport`] opens a bus device node for one transaction and hands
//! back a [`BusPort`] exposing the kernel's capabilities: one batched
//! block transfer for capable buses, and advisory locking plus
//! per-register byte/word access for capability-limited ones. The port is
//! exclusively owned for the duration of the transaction and the node is
//! closed when it drops, never cached across calls.
//!
//! [`LinuxI2c`] is the real implementation over `/dev/i2c-*` via `ioctl`
//! and `flock`. Tests substitute recording stubs.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::io::AsRawFd;

use platform_hwdesc::Bus;

/// One message of a batched block transfer.
pub struct TransferMsg<'a> {
    /// Bus address of the target device.
    pub addr: u16,
    /// True to read into `buf`, false to write from it.
    pub read: bool,
    /// Data buffer; its length is the message length.
    pub buf: &'a mut [u8],
}

/// Opens bus device nodes for transactions.
pub trait Transport {
    /// Opens the bus's device node read/write.
    fn open(&self, bus: &Bus) -> io::Result<Box<dyn BusPort>>;
}

/// An open bus device node.
pub trait BusPort {
    /// Submits the whole message batch as one transaction call.
    fn transfer(&mut self, msgs: &mut [TransferMsg<'_>]) -> io::Result<()>;

    /// Takes the exclusive advisory lock on the node.
    fn lock_exclusive(&mut self) -> io::Result<()>;

    /// Releases the advisory lock.
    fn unlock(&mut self) -> io::Result<()>;

    /// Selects the target device address for subsequent register access.
    fn set_target(&mut self, addr: u16) -> io::Result<()>;

    /// Reads one byte from a register of the selected device.
    fn read_byte(&mut self, register: u8) -> io::Result<u8>;

    /// Reads one word from a register of the selected device.
    fn read_word(&mut self, register: u8) -> io::Result<u16>;

    /// Writes one byte to a register of the selected device.
    fn write_byte(&mut self, register: u8, value: u8) -> io::Result<()>;

    /// Writes one word to a register of the selected device.
    fn write_word(&mut self, register: u8, value: u16) -> io::Result<()>;
}

// Kernel i2c-dev interface. Request codes and struct layouts are fixed by
// the i2c-dev ABI.
const I2C_SLAVE: libc::c_ulong = 0x0703;
const I2C_RDWR: libc::c_ulong = 0x0707;
const I2C_SMBUS: libc::c_ulong = 0x0720;

const I2C_M_RD: u16 = 0x0001;

const I2C_SMBUS_READ: u8 = 1;
const I2C_SMBUS_WRITE: u8 = 0;
const I2C_SMBUS_BYTE_DATA: u32 = 2;
const I2C_SMBUS_WORD_DATA: u32 = 3;
const I2C_SMBUS_BLOCK_MAX: usize = 32;

#[repr(C)]
struct I2cMsg {
    addr: u16,
    flags: u16,
    len: u16,
    buf: *mut u8,
}

#[repr(C)]
struct I2cRdwrIoctlData {
    msgs: *mut I2cMsg,
    nmsgs: u32,
}

#[repr(C)]
union I2cSmbusData {
    byte: u8,
    word: u16,
    block: [u8; I2C_SMBUS_BLOCK_MAX + 2],
}

#[repr(C)]
struct I2cSmbusIoctlData {
    read_write: u8,
    command: u8,
    size: u32,
    data: *mut I2cSmbusData,
}

/// The real transport over `/dev/i2c-*` device nodes.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinuxI2c;

impl Transport for LinuxI2c {
    fn open(&self, bus: &Bus) -> io::Result<Box<dyn BusPort>> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&bus.devname)?;
        Ok(Box::new(LinuxPort { file }))
    }
}

struct LinuxPort {
    file: File,
}

impl LinuxPort {
    fn smbus_access(
        &mut self,
        read_write: u8,
        command: u8,
        size: u32,
        data: *mut I2cSmbusData,
    ) -> io::Result<()> {
        let args = I2cSmbusIoctlData {
            read_write,
            command,
            size,
            data,
        };
        let rc = unsafe { libc::ioctl(self.file.as_raw_fd(), I2C_SMBUS, &args) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl BusPort for LinuxPort {
    fn transfer(&mut self, msgs: &mut [TransferMsg<'_>]) -> io::Result<()> {
        let mut raw: Vec<I2cMsg> = msgs
            .iter_mut()
            .map(|msg| I2cMsg {
                addr: msg.addr,
                flags: if msg.read { I2C_M_RD } else { 0 },
                len: msg.buf.len() as u16,
                buf: msg.buf.as_mut_ptr(),
            })
            .collect();
        let mut args = I2cRdwrIoctlData {
            msgs: raw.as_mut_ptr(),
            nmsgs: raw.len() as u32,
        };
        let rc = unsafe { libc::ioctl(self.file.as_raw_fd(), I2C_RDWR, &mut args) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn lock_exclusive(&mut self) -> io::Result<()> {
        let rc = unsafe { libc::flock(self.file.as_raw_fd(), libc::LOCK_EX) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn unlock(&mut self) -> io::Result<()> {
        let rc = unsafe { libc::flock(self.file.as_raw_fd(), libc::LOCK_UN) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn set_target(&mut self, addr: u16) -> io::Result<()> {
        let rc = unsafe {
            libc::ioctl(self.file.as_raw_fd(), I2C_SLAVE, libc::c_ulong::from(addr))
        };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn read_byte(&mut self, register: u8) -> io::Result<u8> {
        let mut data = I2cSmbusData {
            block: [0; I2C_SMBUS_BLOCK_MAX + 2],
        };
        self.smbus_access(I2C_SMBUS_READ, register, I2C_SMBUS_BYTE_DATA, &mut data)?;
        Ok(unsafe { data.byte })
    }

    fn read_word(&mut self, register: u8) -> io::Result<u16> {
        let mut data = I2cSmbusData {
            block: [0; I2C_SMBUS_BLOCK_MAX + 2],
        };
        self.smbus_access(I2C_SMBUS_READ, register, I2C_SMBUS_WORD_DATA, &mut data)?;
        Ok(unsafe { data.word })
    }

    fn write_byte(&mut self, register: u8, value: u8) -> io::Result<()> {
        let mut data = I2cSmbusData { byte: value };
        self.smbus_access(I2C_SMBUS_WRITE, register, I2C_SMBUS_BYTE_DATA, &mut data)
    }

    fn write_word(&mut self, register: u8, value: u16) -> io::Result<()> {
        let mut data = I2cSmbusData { word: value };
        self.smbus_access(I2C_SMBUS_WRITE, register, I2C_SMBUS_WORD_DATA, &mut data)
    }
}
