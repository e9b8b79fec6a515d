//! Sequence mappings: `Vec<T>`, `[T; N]` and `[T]`.

use bytes::{Buf, BufMut};

use super::{Decode, Encode};
use crate::error::NbtError;
use crate::marshal::write_list;
use crate::wire::TagType;

impl<T: Encode> Encode for [T] {
    fn tag_type(&self) -> TagType {
        T::slice_tag_type(self)
    }

    fn write_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        T::write_slice_payload(self, buf)
    }

    fn write_list_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        write_list(buf, self)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn tag_type(&self) -> TagType {
        self.as_slice().tag_type()
    }

    fn write_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        self.as_slice().write_payload(buf)
    }

    fn write_list_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        write_list(buf, self)
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn tag_type(&self) -> TagType {
        self.as_slice().tag_type()
    }

    fn write_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        self.as_slice().write_payload(buf)
    }

    fn write_list_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        write_list(buf, self)
    }
}

impl<T: Decode + Default> Decode for Vec<T> {
    fn read_payload(&mut self, tag: TagType, buf: &mut dyn Buf) -> Result<(), NbtError> {
        T::read_vec(tag, buf, self)
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn read_payload(&mut self, tag: TagType, buf: &mut dyn Buf) -> Result<(), NbtError> {
        T::read_slice(tag, buf, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_bytes, to_bytes};

    #[test]
    fn element_type_selects_array_or_list() {
        assert_eq!(vec![1u8].tag_type(), TagType::ByteArray);
        assert_eq!(vec![1i32].tag_type(), TagType::IntArray);
        assert_eq!(vec![1i64].tag_type(), TagType::LongArray);
        assert_eq!(vec![1i16].tag_type(), TagType::List);
        assert_eq!(vec![1u32].tag_type(), TagType::List);
        assert_eq!(vec![1i8].tag_type(), TagType::List);
        assert_eq!(vec![true].tag_type(), TagType::List);
        assert_eq!(vec![String::new()].tag_type(), TagType::List);
        assert_eq!([0i64; 3].tag_type(), TagType::LongArray);
    }

    #[test]
    fn empty_list_writes_end_element_type() {
        let empty: Vec<String> = Vec::new();
        let buf = to_bytes("l", &empty).unwrap();
        assert_eq!(
            &buf[..],
            &[0x09, 0x00, 0x01, b'l', 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn list_of_strings_layout() {
        let buf = to_bytes("", &vec!["a".to_string(), "bc".to_string()]).unwrap();
        assert_eq!(
            &buf[..],
            &[
                0x09, 0x00, 0x00, // header
                0x08, 0x00, 0x00, 0x00, 0x02, // element type + count
                0x00, 0x01, b'a', // "a"
                0x00, 0x02, b'b', b'c', // "bc"
            ]
        );
    }

    #[test]
    fn forced_list_of_ints() {
        let mut buf = bytes::BytesMut::new();
        vec![7i32].write_list_payload(&mut buf).unwrap();
        assert_eq!(
            &buf[..],
            &[0x03, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x07]
        );
    }

    #[test]
    fn nested_lists_round_trip() {
        let value = vec![vec![1i16, 2], vec![], vec![3]];
        let buf = to_bytes("n", &value).unwrap();
        let mut decoded: Vec<Vec<i16>> = Vec::new();
        assert_eq!(from_bytes(&buf, &mut decoded).unwrap(), "n");
        assert_eq!(decoded, value);
    }

    #[test]
    fn vec_target_is_resized_to_count() {
        let buf = to_bytes("v", &vec![1i16, 2, 3]).unwrap();
        let mut decoded = vec![9i16; 10];
        from_bytes(&buf, &mut decoded).unwrap();
        assert_eq!(decoded, vec![1, 2, 3]);
    }

    #[test]
    fn fixed_array_accepts_shorter_list() {
        let buf = to_bytes("v", &vec![5i16]).unwrap();
        let mut decoded = [0i16; 3];
        from_bytes(&buf, &mut decoded).unwrap();
        assert_eq!(decoded, [5, 0, 0]);
    }

    #[test]
    fn fixed_array_too_small_for_list() {
        let buf = to_bytes("v", &vec![1i16, 2, 3]).unwrap();
        let mut decoded = [0i16; 2];
        let err = from_bytes(&buf, &mut decoded).unwrap_err();
        assert!(matches!(
            err,
            NbtError::SizeMismatch {
                capacity: 2,
                count: 3
            }
        ));
    }

    #[test]
    fn fixed_array_too_small_for_int_array() {
        let buf = to_bytes("v", &vec![1i32, 2, 3, 4]).unwrap();
        let mut decoded = [0i32; 3];
        assert!(matches!(
            from_bytes(&buf, &mut decoded),
            Err(NbtError::SizeMismatch {
                capacity: 3,
                count: 4
            })
        ));
    }

    #[test]
    fn byte_array_round_trip_into_fixed() {
        let buf = to_bytes("b", &[1u8, 2, 3]).unwrap();
        assert_eq!(buf[0], TagType::ByteArray.as_u8());
        let mut decoded = [0u8; 3];
        from_bytes(&buf, &mut decoded).unwrap();
        assert_eq!(decoded, [1, 2, 3]);
    }

    #[test]
    fn negative_list_count_clamps_to_empty() {
        let data = [
            0x09, 0x00, 0x00, // header
            0x01, 0xFF, 0xFF, 0xFF, 0xFF, // Byte elements, count -1
        ];
        let mut decoded = vec![1u8];
        from_bytes(&data, &mut decoded).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn list_of_bytes_into_vec_u8() {
        let data = [0x09, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02, 0x0A, 0x0B];
        let mut decoded: Vec<u8> = Vec::new();
        from_bytes(&data, &mut decoded).unwrap();
        assert_eq!(decoded, vec![0x0A, 0x0B]);
    }

    #[test]
    fn scalar_into_vec_is_mismatch() {
        let buf = to_bytes("s", &1i16).unwrap();
        let mut decoded: Vec<i16> = Vec::new();
        assert!(matches!(
            from_bytes(&buf, &mut decoded),
            Err(NbtError::TypeMismatch {
                tag: TagType::Short,
                ..
            })
        ));
    }
}
