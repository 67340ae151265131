//! Wire-order conversions for the primitive building blocks
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::Cursor;

use crate::error::DNSResult;
use crate::network_order::{FromNetworkOrder, ToNetworkOrder};

impl ToNetworkOrder for u8 {
    /// ```
    /// use dnsdig::network_order::ToNetworkOrder;
    ///
    /// let mut buffer: Vec<u8> = Vec::new();
    /// assert!(255_u8.to_network_bytes(&mut buffer).is_ok());
    /// assert_eq!(buffer, &[0xFF]);
    /// ```
    fn to_network_bytes(&self, buffer: &mut Vec<u8>) -> DNSResult<usize> {
        buffer.write_u8(*self)?;
        Ok(1)
    }
}

impl<'a> FromNetworkOrder<'a> for u8 {
    /// ```
    /// use std::io::Cursor;
    /// use dnsdig::network_order::FromNetworkOrder;
    ///
    /// let b = vec![0xFF];
    /// let mut buffer = Cursor::new(b.as_slice());
    /// let mut v = 0u8;
    /// assert!(v.from_network_bytes(&mut buffer).is_ok());
    /// assert_eq!(v, 255);
    /// ```
    fn from_network_bytes(&mut self, buffer: &mut Cursor<&'a [u8]>) -> DNSResult<()> {
        *self = buffer.read_u8()?;
        Ok(())
    }
}

impl ToNetworkOrder for u16 {
    /// ```
    /// use dnsdig::network_order::ToNetworkOrder;
    ///
    /// let mut buffer: Vec<u8> = Vec::new();
    /// assert!(0x1234_u16.to_network_bytes(&mut buffer).is_ok());
    /// assert_eq!(buffer, &[0x12, 0x34]);
    /// ```
    fn to_network_bytes(&self, buffer: &mut Vec<u8>) -> DNSResult<usize> {
        buffer.write_u16::<BigEndian>(*self)?;
        Ok(2)
    }
}

impl<'a> FromNetworkOrder<'a> for u16 {
    /// ```
    /// use std::io::Cursor;
    /// use dnsdig::network_order::FromNetworkOrder;
    ///
    /// let b = vec![0x12, 0x34];
    /// let mut buffer = Cursor::new(b.as_slice());
    /// let mut v = 0u16;
    /// assert!(v.from_network_bytes(&mut buffer).is_ok());
    /// assert_eq!(v, 0x1234);
    /// ```
    fn from_network_bytes(&mut self, buffer: &mut Cursor<&'a [u8]>) -> DNSResult<()> {
        *self = buffer.read_u16::<BigEndian>()?;
        Ok(())
    }
}

impl ToNetworkOrder for u32 {
    /// ```
    /// use dnsdig::network_order::ToNetworkOrder;
    ///
    /// let mut buffer: Vec<u8> = Vec::new();
    /// assert!(0x12345678_u32.to_network_bytes(&mut buffer).is_ok());
    /// assert_eq!(buffer, &[0x12, 0x34, 0x56, 0x78]);
    /// ```
    fn to_network_bytes(&self, buffer: &mut Vec<u8>) -> DNSResult<usize> {
        buffer.write_u32::<BigEndian>(*self)?;
        Ok(4)
    }
}

impl<'a> FromNetworkOrder<'a> for u32 {
    /// ```
    /// use std::io::Cursor;
    /// use dnsdig::network_order::FromNetworkOrder;
    ///
    /// let b = vec![0x12, 0x34, 0x56, 0x78];
    /// let mut buffer = Cursor::new(b.as_slice());
    /// let mut v = 0u32;
    /// assert!(v.from_network_bytes(&mut buffer).is_ok());
    /// assert_eq!(v, 0x12345678);
    /// ```
    fn from_network_bytes(&mut self, buffer: &mut Cursor<&'a [u8]>) -> DNSResult<()> {
        *self = buffer.read_u32::<BigEndian>()?;
        Ok(())
    }
}

impl ToNetworkOrder for i32 {
    /// ```
    /// use dnsdig::network_order::ToNetworkOrder;
    ///
    /// let mut buffer: Vec<u8> = Vec::new();
    /// assert_eq!(300_i32.to_network_bytes(&mut buffer).unwrap(), 4);
    /// assert_eq!(buffer, &[0x00, 0x00, 0x01, 0x2C]);
    /// ```
    fn to_network_bytes(&self, buffer: &mut Vec<u8>) -> DNSResult<usize> {
        buffer.write_i32::<BigEndian>(*self)?;
        Ok(4)
    }
}

impl<'a> FromNetworkOrder<'a> for i32 {
    /// ```
    /// use std::io::Cursor;
    /// use dnsdig::network_order::FromNetworkOrder;
    ///
    /// let b = vec![0x00, 0x00, 0x01, 0x2C];
    /// let mut buffer = Cursor::new(b.as_slice());
    /// let mut v = 0i32;
    /// assert!(v.from_network_bytes(&mut buffer).is_ok());
    /// assert_eq!(v, 300);
    /// ```
    fn from_network_bytes(&mut self, buffer: &mut Cursor<&'a [u8]>) -> DNSResult<()> {
        *self = buffer.read_i32::<BigEndian>()?;
        Ok(())
    }
}

impl<T: ToNetworkOrder, const N: usize> ToNetworkOrder for [T; N] {
    /// ```
    /// use dnsdig::network_order::ToNetworkOrder;
    ///
    /// let mut buffer: Vec<u8> = Vec::new();
    /// assert_eq!([0xFFFF_u16; 10].to_network_bytes(&mut buffer).unwrap(), 20);
    /// assert_eq!(buffer, &[0xFF; 20]);
    /// ```
    fn to_network_bytes(&self, buffer: &mut Vec<u8>) -> DNSResult<usize> {
        let mut length = 0usize;

        for x in self {
            length += x.to_network_bytes(buffer)?;
        }
        Ok(length)
    }
}

impl<'a, T: FromNetworkOrder<'a>, const N: usize> FromNetworkOrder<'a> for [T; N] {
    /// ```
    /// use std::io::Cursor;
    /// use dnsdig::network_order::FromNetworkOrder;
    ///
    /// let b = vec![0x12, 0x34, 0x56, 0x78];
    /// let mut buffer = Cursor::new(b.as_slice());
    /// let mut v = [0u8; 4];
    /// assert!(v.from_network_bytes(&mut buffer).is_ok());
    /// assert_eq!(v, [0x12_u8, 0x34, 0x56, 0x78]);
    /// ```
    fn from_network_bytes(&mut self, buffer: &mut Cursor<&'a [u8]>) -> DNSResult<()> {
        for x in self {
            x.from_network_bytes(buffer)?;
        }
        Ok(())
    }
}

impl<T: ToNetworkOrder> ToNetworkOrder for Vec<T> {
    /// ```
    /// use dnsdig::network_order::ToNetworkOrder;
    ///
    /// let mut buffer: Vec<u8> = Vec::new();
    /// let v = vec![[0xFFFF_u16; 3], [0xFFFF; 3], [0xFFFF; 3]];
    /// assert_eq!(v.to_network_bytes(&mut buffer).unwrap(), 18);
    /// assert_eq!(&buffer, &[0xFF; 18]);
    /// ```
    fn to_network_bytes(&self, buffer: &mut Vec<u8>) -> DNSResult<usize> {
        let mut length = 0usize;

        // copy data for each element
        for item in self {
            length += item.to_network_bytes(buffer)?;
        }

        Ok(length)
    }
}
