mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use gsm_core::{ChannelDesc, ChannelType, debug};
use gsm_entities::control::dcch_dispatch::{DcchDispatcher, DcchState, DcchStep};
use gsm_entities::control::queue_channel::queue_channel;
use gsm_entities::{ControlErr, TransactionControllers, TransactionEntry, TransactionKind, TransactionTable};
use gsm_pdus::l3::enums::release_cause::ReleaseCause;
use gsm_pdus::l3::fields::mobile_identity::MobileIdentity;
use gsm_saps::{L3Frame, LapdmPrim, Primitive};

#[test]
fn test_location_updating_completes() {
    debug::setup_logging_verbose();
    let mut test = DcchTest::new(ChannelType::Sdcch);
    let desc = test.peer.desc();

    test.submit(LU_REQUEST);
    assert_eq!(test.dispatcher.step(), DcchStep::Completed);

    assert_eq!(test.controllers.calls(), vec![Call { kind: TransactionKind::LocationUpdating, chan: desc }]);
    assert!(test.take_releases().is_empty());
    assert!(test.transactions.is_empty());
    assert_eq!(test.dispatcher.state(), DcchState::WaitEstablish);
}

#[test]
fn test_each_procedure_reaches_its_controller() {
    debug::setup_logging_verbose();
    let mut test = DcchTest::new(ChannelType::Sdcch);

    for msg in [IMSI_DETACH, CM_SERVICE_REQUEST, PAGING_RESPONSE] {
        test.submit(msg);
        assert_eq!(test.dispatcher.step(), DcchStep::Completed);
    }
    let kinds: Vec<_> = test.controllers.calls().iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![TransactionKind::ImsiDetach, TransactionKind::MobileOriginated, TransactionKind::MobileTerminated]
    );
    assert!(test.take_releases().is_empty());
}

#[test]
fn test_assignment_complete_on_facch() {
    debug::setup_logging_verbose();
    let mut test = DcchTest::new(ChannelType::TchFacch);
    test.submit(ASSIGNMENT_COMPLETE);
    assert_eq!(test.dispatcher.step(), DcchStep::Completed);
    assert_eq!(test.controllers.calls()[0].kind, TransactionKind::Assignment);
}

#[test]
#[should_panic(expected = "not a dedicated signaling channel")]
fn test_location_updating_on_facch_panics() {
    let mut test = DcchTest::new(ChannelType::TchFacch);
    test.submit(LU_REQUEST);
    test.dispatcher.step();
}

#[test]
#[should_panic(expected = "not a traffic channel")]
fn test_assignment_complete_on_sdcch_panics() {
    let mut test = DcchTest::new(ChannelType::Sdcch);
    test.submit(ASSIGNMENT_COMPLETE);
    test.dispatcher.step();
}

#[test]
fn test_unknown_message_releases_and_keeps_earlier_transactions() {
    debug::setup_logging_verbose();
    let mut test = DcchTest::new(ChannelType::Sdcch);
    let desc = test.peer.desc();

    // Call set up by an earlier session on this SDCCH, now running on a TCH
    let live = test.transactions.new_id();
    test.transactions.insert(TransactionEntry::new(live, MobileIdentity::Tmsi(7), TransactionKind::MobileOriginated, desc));

    test.submit(MM_STATUS);
    assert_eq!(test.dispatcher.step(), DcchStep::Released(ReleaseCause::MessageTypeNotImplemented));
    assert_eq!(test.take_releases(), vec![0x61]);
    assert!(test.transactions.lookup(live).is_some());
    assert_eq!(test.controllers.call_count(), 0);
}

#[test]
fn test_read_timeout_keeps_earlier_transactions() {
    debug::setup_logging_verbose();
    let mut test = DcchTest::new(ChannelType::Sdcch);
    let desc = test.peer.desc();

    let live = test.transactions.new_id();
    test.transactions.insert(TransactionEntry::new(live, MobileIdentity::Tmsi(8), TransactionKind::MobileOriginated, desc));

    test.peer.send_establish();
    assert_eq!(test.dispatcher.step(), DcchStep::Released(ReleaseCause::AbnormalTimerExpired));
    assert_eq!(test.take_releases(), vec![0x03]);
    assert!(test.transactions.lookup(live).is_some());

    // An untagged failure in the next session clears only that session's transaction
    test.controllers.push_script(Script::Fail(ControlErr::SessionTimeout { transaction_id: None }));
    test.submit(CM_SERVICE_REQUEST);
    assert_eq!(test.dispatcher.step(), DcchStep::Released(ReleaseCause::AbnormalTimerExpired));
    assert_eq!(test.transactions.len(), 1);
    assert!(test.transactions.lookup(live).is_some());
}

#[test]
fn test_unknown_protocol_releases() {
    let mut test = DcchTest::new(ChannelType::Sdcch);
    // Call control SETUP, no dispatcher for CC
    test.submit("03 05 04 01 A0");
    assert_eq!(test.dispatcher.step(), DcchStep::Released(ReleaseCause::MessageTypeNotImplemented));
    assert_eq!(test.take_releases(), vec![0x61]);
}

#[test]
fn test_read_timeout_releases_and_loop_continues() {
    debug::setup_logging_verbose();
    let mut test = DcchTest::new(ChannelType::Sdcch);

    test.peer.send_establish();
    assert_eq!(test.dispatcher.step(), DcchStep::Released(ReleaseCause::AbnormalTimerExpired));
    assert_eq!(test.take_releases(), vec![0x03]);
    assert_eq!(test.dispatcher.state(), DcchState::WaitEstablish);

    test.submit(LU_REQUEST);
    assert_eq!(test.dispatcher.step(), DcchStep::Completed);
    assert_eq!(test.controllers.call_count(), 1);
}

#[test]
fn test_establish_timeout() {
    let desc = ChannelDesc::new(ChannelType::Sdcch, 0, 3);
    let (chan, peer) = queue_channel(desc, TEST_T200);
    let transactions = Arc::new(TransactionTable::new());
    let controllers: Arc<dyn TransactionControllers> = Arc::new(MockControllers::new(transactions.clone()));
    let mut dispatcher = DcchDispatcher::new(Box::new(chan), controllers, transactions, Some(Duration::from_millis(10)));

    assert_eq!(dispatcher.step(), DcchStep::Released(ReleaseCause::AbnormalTimerExpired));
    let release = peer.try_recv_prim().expect("release sent");
    assert_eq!(release.sdu.map(|f| f.as_bytes().to_vec()), Some(vec![0x06, 0x0D, 0x03]));
}

#[test]
fn test_primitives_before_establish_are_discarded() {
    let mut test = DcchTest::new(ChannelType::Sdcch);
    test.peer.send_prim(LapdmPrim::new(Primitive::Release));
    test.peer.send_l3(frame(CM_SERVICE_REQUEST));
    test.submit(LU_REQUEST);

    assert_eq!(test.dispatcher.step(), DcchStep::Completed);
    assert_eq!(test.controllers.calls()[0].kind, TransactionKind::LocationUpdating);
}

#[test]
fn test_gprs_suspension_is_ignored() {
    debug::setup_logging_verbose();
    let mut test = DcchTest::new(ChannelType::Sdcch);
    test.submit(GPRS_SUSPENSION_REQUEST);
    assert_eq!(test.dispatcher.step(), DcchStep::Completed);
    assert_eq!(test.controllers.call_count(), 0);
    assert!(test.take_releases().is_empty());
}

#[test]
fn test_unexpected_message_is_redispatched() {
    debug::setup_logging_verbose();
    let mut test = DcchTest::new(ChannelType::Sdcch);
    test.controllers.push_script(Script::FailTagged(ControlErr::UnexpectedMessage {
        frame: Some(frame(CM_SERVICE_REQUEST)),
        transaction_id: None,
    }));

    test.submit(LU_REQUEST);
    assert_eq!(test.dispatcher.step(), DcchStep::Completed);

    let kinds: Vec<_> = test.controllers.calls().iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![TransactionKind::LocationUpdating, TransactionKind::MobileOriginated]);
    assert!(test.take_releases().is_empty());
    assert!(test.transactions.is_empty());
}

#[test]
fn test_redispatch_chain_ends_in_release() {
    let mut test = DcchTest::new(ChannelType::Sdcch);
    test.controllers.push_script(Script::FailTagged(ControlErr::UnexpectedMessage {
        frame: Some(frame(PAGING_RESPONSE)),
        transaction_id: None,
    }));
    test.controllers.push_script(Script::FailTagged(ControlErr::ProcedureTimerExpired {
        timer: "T3113".to_string(),
        transaction_id: None,
    }));

    test.submit(CM_SERVICE_REQUEST);
    assert_eq!(test.dispatcher.step(), DcchStep::Released(ReleaseCause::AbnormalTimerExpired));
    assert_eq!(test.controllers.call_count(), 2);
    assert_eq!(test.take_releases(), vec![0x03]);
    assert!(test.transactions.is_empty());
}

#[test]
fn test_unparseable_captured_frame_is_dropped() {
    debug::setup_logging_verbose();
    let mut test = DcchTest::new(ChannelType::Sdcch);
    test.controllers.push_script(Script::FailTagged(ControlErr::UnexpectedMessage {
        frame: Some(L3Frame::new(vec![0x05])),
        transaction_id: None,
    }));

    test.submit(LU_REQUEST);
    assert_eq!(test.dispatcher.step(), DcchStep::Dropped);
    assert!(test.take_releases().is_empty());
    assert!(test.transactions.is_empty());
}

#[test]
fn test_unexpected_message_without_frame_releases() {
    let mut test = DcchTest::new(ChannelType::Sdcch);
    test.controllers.push_script(Script::FailTagged(ControlErr::UnexpectedMessage { frame: None, transaction_id: None }));
    test.submit(LU_REQUEST);
    assert_eq!(
        test.dispatcher.step(),
        DcchStep::Released(ReleaseCause::MessageTypeNotCompatibleWithProtocolState)
    );
    assert_eq!(test.take_releases(), vec![0x62]);
}

#[test]
fn test_unexpected_primitive_during_procedure() {
    debug::setup_logging_verbose();
    let mut test = DcchTest::new(ChannelType::Sdcch);
    test.controllers.push_script(Script::ReadNext);

    test.submit(CM_SERVICE_REQUEST);
    test.peer.send_prim(LapdmPrim::new(Primitive::Release));
    assert_eq!(
        test.dispatcher.step(),
        DcchStep::Released(ReleaseCause::MessageTypeNotCompatibleWithProtocolState)
    );
    assert_eq!(test.take_releases(), vec![0x62]);
    assert!(test.transactions.is_empty());
}

#[test]
fn test_session_failures_clear_transaction() {
    debug::setup_logging_verbose();
    let mut test = DcchTest::new(ChannelType::Sdcch);

    // Tagged with its transaction id
    test.controllers.push_script(Script::FailTagged(ControlErr::SessionTimeout { transaction_id: None }));
    test.submit(PAGING_RESPONSE);
    assert_eq!(test.dispatcher.step(), DcchStep::Released(ReleaseCause::AbnormalTimerExpired));
    assert!(test.transactions.is_empty());

    // Untagged, found through the channel binding
    test.controllers.push_script(Script::Fail(ControlErr::SessionProtocolError {
        reason: "unexpected BYE".to_string(),
        transaction_id: None,
    }));
    test.submit(CM_SERVICE_REQUEST);
    assert_eq!(test.dispatcher.step(), DcchStep::Released(ReleaseCause::AbnormalUnspecified));
    assert!(test.transactions.is_empty());

    assert_eq!(test.take_releases(), vec![0x03, 0x01]);
}

#[test]
fn test_failure_id_takes_precedence_over_channel_lookup() {
    let mut test = DcchTest::new(ChannelType::Sdcch);
    // Names a transaction that was never created
    test.controllers.push_script(Script::Fail(ControlErr::SessionTimeout { transaction_id: Some(999) }));

    test.submit(LU_REQUEST);
    assert_eq!(test.dispatcher.step(), DcchStep::Released(ReleaseCause::AbnormalTimerExpired));
    // Clearing 999 was a no-op, the controller's own transaction is untouched
    assert_eq!(test.transactions.len(), 1);
    assert!(!test.transactions.clear(999));
}

#[test]
fn test_read_timeout_inside_procedure_clears_transaction() {
    debug::setup_logging_verbose();
    let mut test = DcchTest::new(ChannelType::Sdcch);
    test.controllers.push_script(Script::ReadNext);

    // Controller waits for a follow-up message that never comes
    test.submit(LU_REQUEST);
    assert_eq!(test.dispatcher.step(), DcchStep::Released(ReleaseCause::AbnormalTimerExpired));
    assert_eq!(test.take_releases(), vec![0x03]);
    assert_eq!(test.controllers.call_count(), 1);
    assert!(test.transactions.is_empty());
}

#[test]
fn test_recovery_on_facch() {
    debug::setup_logging_verbose();
    let mut test = DcchTest::new(ChannelType::TchFacch);

    test.controllers.push_script(Script::ReadNext);
    test.submit(ASSIGNMENT_COMPLETE);
    assert_eq!(test.dispatcher.step(), DcchStep::Released(ReleaseCause::AbnormalTimerExpired));
    assert!(test.transactions.is_empty());

    test.controllers.push_script(Script::Fail(ControlErr::SessionProtocolError {
        reason: "peer hung up".to_string(),
        transaction_id: None,
    }));
    test.submit(CM_SERVICE_REQUEST);
    assert_eq!(test.dispatcher.step(), DcchStep::Released(ReleaseCause::AbnormalUnspecified));
    assert!(test.transactions.is_empty());

    test.submit(MM_STATUS);
    assert_eq!(test.dispatcher.step(), DcchStep::Released(ReleaseCause::MessageTypeNotImplemented));

    assert_eq!(test.take_releases(), vec![0x03, 0x01, 0x61]);
    assert_eq!(test.dispatcher.state(), DcchState::WaitEstablish);
}
