use sheet_packer::prelude::*;

/// Sheet-filling allocations on a packed sheet use all four channel planes
/// before a second sheet is opened.
#[test]
fn packed_sheet_cycles_all_four_channels() {
    let mut packer = AtlasPacker::new(SheetKind::Packed, 64).expect("packer");

    let mut channels = Vec::new();
    for _ in 0..4 {
        let s = packer.allocate(Size::new(64, 64)).expect("allocate");
        assert_eq!((s.rect.x, s.rect.y), (0, 0));
        assert_eq!(s.sheet.index(), 0);
        channels.push(s.channel);
    }
    assert_eq!(channels, Channel::ALL);
    assert_eq!(packer.sheet_count(), 1);

    // fifth sheet-filling request rolls over to a fresh sheet
    let fifth = packer.allocate(Size::new(64, 64)).expect("allocate fifth");
    assert_eq!(fifth.sheet.index(), 1);
    assert_eq!(fifth.channel, Channel::Red);
    assert_eq!(packer.sheet_count(), 2);
}

#[test]
fn indexed_sheet_rolls_over_without_extra_channels() {
    let mut packer = AtlasPacker::new(SheetKind::Indexed, 32).expect("packer");

    let first = packer.allocate(Size::new(32, 32)).expect("allocate first");
    let second = packer.allocate(Size::new(32, 32)).expect("allocate second");

    assert_eq!(first.sheet.index(), 0);
    assert_eq!(second.sheet.index(), 1);
    assert_eq!(first.channel, Channel::Red);
    assert_eq!(second.channel, Channel::Red);
    assert_eq!(packer.sheet_count(), 2);
}

/// Requests taller than the sheet keep forcing new sheets; the owned list
/// grows strictly.
#[test]
fn oversized_height_forces_sheet_growth() {
    let mut packer = AtlasPacker::new(SheetKind::Indexed, 16).expect("packer");
    assert_eq!(packer.sheet_count(), 1);

    packer.allocate(Size::new(8, 40)).expect("allocate tall");
    assert_eq!(packer.sheet_count(), 2);

    packer.allocate(Size::new(8, 40)).expect("allocate tall again");
    assert_eq!(packer.sheet_count(), 3);
}

#[test]
fn capacity_counts_every_channel_plane() {
    let mut packer = AtlasPacker::new(SheetKind::Packed, 64).expect("packer");
    assert_eq!(packer.kind(), SheetKind::Packed);

    let stats = packer.stats();
    assert_eq!(stats.num_sheets, 1);
    assert_eq!(stats.total_area, 64 * 64 * 4);
    assert_eq!(stats.used_area, 0);
    assert_eq!(stats.occupancy, 0.0);
    assert_eq!(stats.wasted_area(), 64 * 64 * 4);

    // four sheet-filling sprites use the whole capacity of one sheet
    let mut used = 0u64;
    for _ in 0..4 {
        let s = packer.allocate(Size::new(64, 64)).expect("allocate");
        used += s.rect.area();
    }
    let stats = packer.stats();
    assert_eq!(stats.num_sprites, 4);
    assert_eq!(stats.used_area, used);
    assert_eq!(stats.occupancy, 1.0);
    assert_eq!(stats.wasted_area(), 0);
    assert!(stats.summary().contains("Sheets: 1"));
}

#[test]
fn indexed_capacity_is_single_plane() {
    let packer = AtlasPacker::new(SheetKind::Indexed, 64).expect("packer");
    let stats = packer.stats();
    assert_eq!(stats.total_area, 64 * 64);
}
