//! GT911 register access and point reading
//!
//! Register addresses are 16-bit, sent big-endian on the wire. The status
//! register must be acknowledged by writing zero after every read, or the
//! controller stops updating it.

use heapless::Vec;
use lumen_hal::{I2cBus, I2cError};

use crate::bus::{BusManager, DeviceHandle};
use crate::error::AttachError;

const REG_PRODUCT_ID: u16 = 0x8140;
const REG_STATUS: u16 = 0x814E;
const REG_POINTS: u16 = 0x814F;

const STATUS_READY: u8 = 0x80;
const POINT_LEN: usize = 8;

/// Transaction timeout for register traffic
const IO_TIMEOUT_MS: u32 = 50;

/// Hardware limit on simultaneously reported touches
pub const MAX_POINTS: usize = 5;

/// One reported touch contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    /// Track id, stable while the contact persists
    pub id: u8,
    pub x: u16,
    pub y: u16,
    /// Contact area reported by the controller
    pub size: u16,
}

/// Driver for a GT911 whose address has already been resolved
#[derive(Debug)]
pub struct Gt911 {
    device: DeviceHandle,
    x_max: u16,
    y_max: u16,
}

impl Gt911 {
    /// Attach the controller at `address` as a persistent bus device.
    ///
    /// Coordinates from [`read_points`](Gt911::read_points) are clamped
    /// to `x_max` / `y_max`, the panel's last valid pixel positions.
    pub fn attach<B: I2cBus>(
        bus: &mut BusManager<B>,
        address: u8,
        x_max: u16,
        y_max: u16,
    ) -> Result<Self, AttachError> {
        let device = bus.add_device(address, super::TOUCH_SCL_HZ)?;
        Ok(Self {
            device,
            x_max,
            y_max,
        })
    }

    /// Address the controller was attached at
    pub fn address(&self) -> u8 {
        self.device.address()
    }

    /// Coordinate clamp bounds `(x_max, y_max)`
    pub fn bounds(&self) -> (u16, u16) {
        (self.x_max, self.y_max)
    }

    /// Read the 4-byte ASCII product id (`"911"` plus a NUL on this part)
    pub fn product_id<B: I2cBus>(&self, bus: &mut BusManager<B>) -> Result<[u8; 4], I2cError> {
        let mut id = [0u8; 4];
        self.read_regs(bus, REG_PRODUCT_ID, &mut id)?;
        Ok(id)
    }

    /// Read the currently reported touch points.
    ///
    /// Returns an empty list when the controller has no fresh report.
    /// When a report was consumed the status register is acknowledged so
    /// the controller produces the next one.
    pub fn read_points<B: I2cBus>(
        &self,
        bus: &mut BusManager<B>,
    ) -> Result<Vec<TouchPoint, MAX_POINTS>, I2cError> {
        let mut status = [0u8];
        self.read_regs(bus, REG_STATUS, &mut status)?;

        let mut points = Vec::new();
        if status[0] & STATUS_READY == 0 {
            return Ok(points);
        }

        let count = (status[0] & 0x0F) as usize;
        if count > 0 {
            let mut raw = [0u8; POINT_LEN * MAX_POINTS];
            let count = count.min(MAX_POINTS);
            self.read_regs(bus, REG_POINTS, &mut raw[..count * POINT_LEN])?;

            for chunk in raw[..count * POINT_LEN].chunks_exact(POINT_LEN) {
                let x = u16::from_le_bytes([chunk[1], chunk[2]]).min(self.x_max);
                let y = u16::from_le_bytes([chunk[3], chunk[4]]).min(self.y_max);
                let size = u16::from_le_bytes([chunk[5], chunk[6]]);
                // Capacity equals MAX_POINTS, push cannot fail
                let _ = points.push(TouchPoint {
                    id: chunk[0],
                    x,
                    y,
                    size,
                });
            }
        }

        self.write_reg(bus, REG_STATUS, 0)?;
        Ok(points)
    }

    fn read_regs<B: I2cBus>(
        &self,
        bus: &mut BusManager<B>,
        reg: u16,
        buf: &mut [u8],
    ) -> Result<(), I2cError> {
        bus.transmit_receive(&self.device, &reg.to_be_bytes(), buf, IO_TIMEOUT_MS)
    }

    fn write_reg<B: I2cBus>(
        &self,
        bus: &mut BusManager<B>,
        reg: u16,
        value: u8,
    ) -> Result<(), I2cError> {
        let addr = reg.to_be_bytes();
        bus.transmit(&self.device, &[addr[0], addr[1], value], IO_TIMEOUT_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;

    /// Bus that replays scripted register reads and records writes
    struct ScriptedBus {
        // (register address bytes, response)
        reads: RefCell<std::vec::Vec<([u8; 2], std::vec::Vec<u8>)>>,
        writes: RefCell<std::vec::Vec<std::vec::Vec<u8>>>,
    }

    impl ScriptedBus {
        fn new() -> Self {
            Self {
                reads: RefCell::new(std::vec::Vec::new()),
                writes: RefCell::new(std::vec::Vec::new()),
            }
        }

        fn expect_read(&self, reg: u16, response: &[u8]) {
            self.reads
                .borrow_mut()
                .push((reg.to_be_bytes(), response.to_vec()));
        }
    }

    impl I2cBus for &ScriptedBus {
        fn write(&mut self, _address: u8, data: &[u8], _timeout_ms: u32) -> Result<(), I2cError> {
            self.writes.borrow_mut().push(data.to_vec());
            Ok(())
        }

        fn read(
            &mut self,
            _address: u8,
            _buf: &mut [u8],
            _timeout_ms: u32,
        ) -> Result<(), I2cError> {
            Err(I2cError::Bus)
        }

        fn write_read(
            &mut self,
            _address: u8,
            data: &[u8],
            buf: &mut [u8],
            _timeout_ms: u32,
        ) -> Result<(), I2cError> {
            let mut reads = self.reads.borrow_mut();
            if reads.is_empty() {
                return Err(I2cError::Bus);
            }
            let (reg, response) = reads.remove(0);
            assert_eq!(data, reg);
            buf.copy_from_slice(&response[..buf.len()]);
            Ok(())
        }
    }

    fn attach_gt911<'b>(bus: &'b ScriptedBus) -> (BusManager<&'b ScriptedBus>, Gt911) {
        let mut manager: BusManager<&ScriptedBus> = BusManager::new();
        manager.ensure_bus(|| Ok(bus)).unwrap();
        let touch = Gt911::attach(&mut manager, 0x5D, 799, 479).unwrap();
        (manager, touch)
    }

    fn point_bytes(id: u8, x: u16, y: u16, size: u16) -> [u8; POINT_LEN] {
        let x = x.to_le_bytes();
        let y = y.to_le_bytes();
        let s = size.to_le_bytes();
        [id, x[0], x[1], y[0], y[1], s[0], s[1], 0]
    }

    #[test]
    fn test_attach_claims_address() {
        let bus = ScriptedBus::new();
        let (mut manager, touch) = attach_gt911(&bus);
        assert_eq!(touch.address(), 0x5D);
        assert_eq!(touch.bounds(), (799, 479));
        assert_eq!(
            manager.add_device(0x5D, 100_000).unwrap_err(),
            AttachError::AddressInUse
        );
    }

    #[test]
    fn test_product_id_reads_from_0x8140() {
        let bus = ScriptedBus::new();
        bus.expect_read(REG_PRODUCT_ID, b"911\0");
        let (mut manager, touch) = attach_gt911(&bus);
        assert_eq!(touch.product_id(&mut manager).unwrap(), *b"911\0");
    }

    #[test]
    fn test_stale_status_yields_no_points_and_no_ack() {
        let bus = ScriptedBus::new();
        bus.expect_read(REG_STATUS, &[0x00]);
        let (mut manager, touch) = attach_gt911(&bus);

        let points = touch.read_points(&mut manager).unwrap();
        assert!(points.is_empty());
        assert!(bus.writes.borrow().is_empty());
    }

    #[test]
    fn test_ready_report_is_parsed_and_acknowledged() {
        let bus = ScriptedBus::new();
        bus.expect_read(REG_STATUS, &[STATUS_READY | 2]);
        let mut raw = [0u8; POINT_LEN * 2];
        raw[..POINT_LEN].copy_from_slice(&point_bytes(0, 100, 200, 12));
        raw[POINT_LEN..].copy_from_slice(&point_bytes(1, 640, 400, 9));
        bus.expect_read(REG_POINTS, &raw);

        let (mut manager, touch) = attach_gt911(&bus);
        let points = touch.read_points(&mut manager).unwrap();

        assert_eq!(
            points.as_slice(),
            &[
                TouchPoint {
                    id: 0,
                    x: 100,
                    y: 200,
                    size: 12
                },
                TouchPoint {
                    id: 1,
                    x: 640,
                    y: 400,
                    size: 9
                },
            ]
        );

        // Status acknowledged: zero written to 0x814E
        assert_eq!(bus.writes.borrow().as_slice(), &[vec![0x81, 0x4E, 0x00]]);
    }

    #[test]
    fn test_empty_ready_report_is_still_acknowledged() {
        let bus = ScriptedBus::new();
        bus.expect_read(REG_STATUS, &[STATUS_READY]);
        let (mut manager, touch) = attach_gt911(&bus);

        let points = touch.read_points(&mut manager).unwrap();
        assert!(points.is_empty());
        assert_eq!(bus.writes.borrow().len(), 1);
    }

    #[test]
    fn test_coordinates_are_clamped_to_panel_bounds() {
        let bus = ScriptedBus::new();
        bus.expect_read(REG_STATUS, &[STATUS_READY | 1]);
        bus.expect_read(REG_POINTS, &point_bytes(0, 4000, 4000, 1));

        let (mut manager, touch) = attach_gt911(&bus);
        let points = touch.read_points(&mut manager).unwrap();
        assert_eq!((points[0].x, points[0].y), (799, 479));
    }
}
