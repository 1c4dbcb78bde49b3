/// Axis-aligned Bounding Box on the integer pixel grid
///
/// TOP / LEFT corner is 0/0; `right` and `bottom` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AaBB {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl AaBB {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        debug_assert!(width >= 0 && height >= 0);
        Self { x, y, width, height }
    }

    pub fn left(&self) -> i32 { self.x }

    pub fn right(&self) -> i32 { self.x + self.width }

    pub fn top(&self) -> i32 { self.y }

    pub fn bottom(&self) -> i32 { self.y + self.height }

    pub fn center_y(&self) -> i32 { self.y + self.height / 2 }

    pub fn set_top(&mut self, top: i32) { self.y = top }

    pub fn set_bottom(&mut self, bottom: i32) { self.y = bottom - self.height }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        AaBB {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// true, if both boxes share an area; touching edges do not count
    pub fn intersects(&self, other: &AaBB) -> bool {
        self.width > 0
            && self.height > 0
            && other.width > 0
            && other.height > 0
            && self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::AaBB;

    #[rstest]
    #[case(AaBB::new(0, 0, 10, 10), AaBB::new(5, 5, 10, 10), true)]
    #[case(AaBB::new(0, 0, 10, 10), AaBB::new(10, 0, 10, 10), false)]
    #[case(AaBB::new(0, 0, 10, 10), AaBB::new(0, 10, 10, 10), false)]
    #[case(AaBB::new(0, 0, 10, 10), AaBB::new(9, 9, 7, 7), true)]
    #[case(AaBB::new(620, 190, 10, 100), AaBB::new(614, 285, 7, 7), true)]
    #[case(AaBB::new(620, 190, 10, 100), AaBB::new(613, 285, 7, 7), false)]
    #[case(AaBB::new(0, 0, 10, 10), AaBB::new(2, 2, 0, 0), false)]
    fn test_intersects(#[case] a: AaBB, #[case] b: AaBB, #[case] expected: bool) {
        assert_eq!(a.intersects(&b), expected);
        assert_eq!(b.intersects(&a), expected);
    }

    #[test]
    fn test_edges() {
        let mut r = AaBB::new(10, 190, 10, 100);
        assert_eq!((r.left(), r.right(), r.top(), r.bottom(), r.center_y()), (10, 20, 190, 290, 240));
        r.set_bottom(480);
        assert_eq!(r.top(), 380);
        r.set_top(0);
        assert_eq!(r.bottom(), 100);
        assert_eq!(r.translate(3, -4), AaBB::new(13, -4, 10, 100));
    }
}
