//! Display interface using I2C
//!
//! Every transfer starts with a control byte: [`Flag::I2C_COMMAND`] for a
//! command, [`Flag::I2C_DATA`] for display RAM contents.
use crate::ssd1306::{config::DisplayConfig, flag::Flag, BLOCK_SIZE};
use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};
use embedded_hal::i2c::I2c;

/// SSD1306 connected over I2C
pub struct I2cInterface<I2C> {
    /// I2C bus
    i2c: I2C,
    /// 7 bit address of the panel
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Wrap a bus, talking to the panel at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        I2cInterface { i2c, address }
    }

    /// Wrap a bus, talking to the panel at the address of `config`
    pub fn from_config(i2c: I2C, config: &DisplayConfig) -> Self {
        I2cInterface::new(i2c, config.address)
    }

    /// Address the panel is written at
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> I2cInterface<I2C>
where
    I2C: I2c,
{
    /// Check that a device acknowledges the panel address.
    ///
    /// Sends an empty write; a bus error counts as not connected.
    pub fn is_connected(&mut self) -> bool {
        match self.i2c.write(self.address, &[]) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("No answer at 0x{:02X}: {:?}", self.address, e);
                false
            }
        }
    }

    /// Basic function for sending one command byte
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        match self.i2c.write(self.address, &[Flag::I2C_COMMAND, command]) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("I2C write error for command 0x{:02X}: {:?}", command, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    /// Send up to [`BLOCK_SIZE`] bytes of display data in one transfer
    pub(crate) fn data_block(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        debug_assert!(data.len() <= BLOCK_SIZE);

        let mut buffer = [0u8; BLOCK_SIZE + 1];
        buffer[0] = Flag::I2C_DATA;
        buffer[1..=data.len()].copy_from_slice(data);

        match self.i2c.write(self.address, &buffer[..=data.len()]) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("I2C write error for {} data bytes: {:?}", data.len(), e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    /// Send any amount of display data, split into blocks
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        for block in data.chunks(BLOCK_SIZE) {
            self.data_block(block)?;
        }
        Ok(())
    }
}

impl<I2C> WriteOnlyDataCommand for I2cInterface<I2C>
where
    I2C: I2c,
{
    fn send_commands(&mut self, cmds: DataFormat<'_>) -> Result<(), DisplayError> {
        match cmds {
            DataFormat::U8(commands) => {
                for &command in commands {
                    self.cmd(command)?;
                }
                Ok(())
            }
            DataFormat::U8Iter(commands) => {
                for command in commands {
                    self.cmd(command)?;
                }
                Ok(())
            }
            _ => Err(DisplayError::DataFormatNotImplemented),
        }
    }

    fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
        match buf {
            DataFormat::U8(data) => self.data(data),
            DataFormat::U8Iter(data) => {
                let mut block = [0u8; BLOCK_SIZE];
                let mut len = 0;
                for byte in data {
                    block[len] = byte;
                    len += 1;
                    if len == BLOCK_SIZE {
                        self.data_block(&block)?;
                        len = 0;
                    }
                }
                if len > 0 {
                    self.data_block(&block[..len])?;
                }
                Ok(())
            }
            _ => Err(DisplayError::DataFormatNotImplemented),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    /// Bus that records every write as `(address, bytes)`
    #[derive(Default)]
    struct RecordingBus {
        writes: Vec<(u8, Vec<u8>)>,
        fail: bool,
    }

    impl ErrorType for RecordingBus {
        type Error = ErrorKind;
    }

    impl I2c for RecordingBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_commands_one_per_write() {
        let mut di = I2cInterface::new(RecordingBus::default(), 0x3D);
        di.send_commands(DataFormat::U8(&[0xAE, 0xD5, 0x80])).unwrap();

        let bus = di.release();
        assert_eq!(
            bus.writes,
            vec![
                (0x3D, vec![0x00, 0xAE]),
                (0x3D, vec![0x00, 0xD5]),
                (0x3D, vec![0x00, 0x80]),
            ]
        );
    }

    #[test]
    fn test_data_split_into_blocks() {
        let mut di = I2cInterface::new(RecordingBus::default(), 0x3C);
        let data: Vec<u8> = (0..70).collect();
        di.send_data(DataFormat::U8(&data)).unwrap();

        let bus = di.release();
        let lengths: Vec<usize> = bus.writes.iter().map(|(_, w)| w.len()).collect();
        assert_eq!(lengths, vec![33, 33, 7]);
        assert!(bus.writes.iter().all(|(a, w)| *a == 0x3C && w[0] == 0x40));
        assert_eq!(&bus.writes[1].1[1..], &data[32..64]);
    }

    #[test]
    fn test_data_from_iterator() {
        let mut di = I2cInterface::new(RecordingBus::default(), 0x3D);
        let mut bytes = std::iter::repeat(0xAA).take(40);
        di.send_data(DataFormat::U8Iter(&mut bytes)).unwrap();

        let bus = di.release();
        assert_eq!(bus.writes.len(), 2);
        assert_eq!(bus.writes[0].1.len(), 33);
        assert_eq!(bus.writes[1].1, vec![0x40, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA]);
    }

    #[test]
    fn test_unsupported_format() {
        let mut di = I2cInterface::new(RecordingBus::default(), 0x3D);
        assert!(matches!(
            di.send_data(DataFormat::U16(&[1, 2])),
            Err(DisplayError::DataFormatNotImplemented)
        ));
    }

    #[test]
    fn test_is_connected_sends_empty_write() {
        let mut di = I2cInterface::new(RecordingBus::default(), 0x3D);
        assert!(di.is_connected());
        assert_eq!(di.release().writes, vec![(0x3D, vec![])]);
    }

    #[test]
    fn test_is_connected_false_on_bus_error() {
        let bus = RecordingBus {
            fail: true,
            ..Default::default()
        };
        let mut di = I2cInterface::new(bus, 0x3C);
        assert!(!di.is_connected());
        assert!(di.release().writes.is_empty());
    }

    #[test]
    fn test_from_config_uses_config_address() {
        let config = DisplayConfig::oled_128x32();
        let mut di = I2cInterface::from_config(RecordingBus::default(), &config);
        assert_eq!(di.address(), 0x3C);

        di.send_commands(DataFormat::U8(&[0xAF])).unwrap();
        assert_eq!(di.release().writes, vec![(0x3C, vec![0x00, 0xAF])]);

        let config = DisplayConfig::default().with_address(0x3C);
        assert_eq!(I2cInterface::from_config(RecordingBus::default(), &config).address(), 0x3C);
    }

    #[test]
    fn test_bus_error_is_reported() {
        let bus = RecordingBus {
            fail: true,
            ..Default::default()
        };
        let mut di = I2cInterface::new(bus, 0x3D);
        assert!(matches!(
            di.send_commands(DataFormat::U8(&[0xAF])),
            Err(DisplayError::BusWriteError)
        ));
    }
}
