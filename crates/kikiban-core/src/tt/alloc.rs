//! 置換表用のアラインメント付きメモリ確保

use std::alloc::{Layout, alloc_zeroed, dealloc, handle_alloc_error};
use std::ptr::NonNull;

/// ゼロ埋め済みのアラインメント付きメモリブロック
pub(super) struct Allocation {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl Allocation {
    /// `bytes` バイトを `align` 境界で確保する
    ///
    /// 確保に失敗した場合はログを出してから `handle_alloc_error` で中断する。
    pub(super) fn allocate_zeroed(bytes: usize, align: usize) -> Self {
        assert_lv!(bytes > 0);

        let layout = match Layout::from_size_align(bytes, align) {
            Ok(layout) => layout,
            Err(e) => {
                log::error!("invalid hash table layout: {bytes} bytes, align {align}: {e}");
                std::process::abort();
            }
        };

        // SAFETY: layout のサイズは0より大きい
        let raw = unsafe { alloc_zeroed(layout) };
        match NonNull::new(raw) {
            Some(ptr) => Self { ptr, layout },
            None => {
                log::error!("failed to allocate {} MiB for hash table", bytes >> 20);
                handle_alloc_error(layout)
            }
        }
    }

    #[inline]
    pub(super) fn ptr(&self) -> NonNull<u8> {
        self.ptr
    }

    #[inline]
    pub(super) fn size(&self) -> usize {
        self.layout.size()
    }
}

impl Drop for Allocation {
    fn drop(&mut self) {
        // SAFETY: allocate_zeroed で同じ layout を使って確保したもの
        unsafe { dealloc(self.ptr.as_ptr(), self.layout) };
    }
}

// SAFETY: Allocation は確保したブロックを排他的に所有する
unsafe impl Send for Allocation {}
unsafe impl Sync for Allocation {}
