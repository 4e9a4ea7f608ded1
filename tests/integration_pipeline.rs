// Integration tests for the classify-and-move pipeline
// Events are fed straight into FileProcessor, no OS watcher involved

use oscillogram_sorter::{ProcessedPaths, SorterError, WatchEvent};
use std::time::Duration;

mod common;

#[tokio::test]
async fn test_keyword_file_gets_matched_suffix() {
	let (_dir, processor) = common::setup_processor();
	let config = processor.config().clone();
	let path = common::create_candidate(&config.watched_root, "sample.DO", "Test 4000 run\nrest\n");

	let handle = processor.handle_event(&WatchEvent::created(&path)).expect("should start");
	let dest = handle.await.unwrap().unwrap();

	assert_eq!(dest, config.output_dir.join("sampleЭлИзнос.DO"));
	assert!(dest.exists());
	assert!(!path.exists());
	assert!(!config.watched_root.join("sample.txt").exists());
	assert_eq!(std::fs::read_to_string(&dest).unwrap(), "Test 4000 run\nrest\n");
}

#[tokio::test]
async fn test_file_without_keyword_gets_unmatched_suffix() {
	let (_dir, processor) = common::setup_processor();
	let config = processor.config().clone();
	let path = common::create_candidate(&config.watched_root, "sample.DO", "Test 200 run\n4000\n");

	let dest = processor.process_event(&WatchEvent::created(&path)).await.unwrap().unwrap();

	assert_eq!(dest, config.output_dir.join("sampleПКС.DO"));
	assert_eq!(common::file_names(&config.output_dir), vec!["sampleПКС.DO"]);
}

#[tokio::test]
async fn test_moved_in_file_is_processed_like_created() {
	let (_dir, processor) = common::setup_processor();
	let config = processor.config().clone();
	let staged = common::create_candidate(&config.watched_root, "staged.tmp", "U=800\n");
	let path = config.watched_root.join("moved.DO");
	std::fs::rename(&staged, &path).unwrap();

	let dest = processor
		.process_event(&WatchEvent::moved(&staged, &path))
		.await
		.expect("moved-in candidate should be admitted")
		.unwrap();

	assert_eq!(dest.file_name().unwrap(), "movedЭлИзнос.DO");
}

#[tokio::test]
async fn test_redelivered_events_are_no_ops() {
	let (_dir, processor) = common::setup_processor();
	let config = processor.config().clone();
	let path = common::create_candidate(&config.watched_root, "once.DO", "Test 100 run\n");

	let first = processor.handle_event(&WatchEvent::created(&path)).unwrap();
	assert!(processor.handle_event(&WatchEvent::modified(&path)).is_none());
	assert!(processor.handle_event(&WatchEvent::created(&path)).is_none());
	first.await.unwrap().unwrap();

	// After completion too
	assert!(processor.handle_event(&WatchEvent::modified(&path)).is_none());
	assert_eq!(common::file_names(&config.output_dir), vec!["onceЭлИзнос.DO"]);
}

#[tokio::test]
async fn test_output_dir_files_never_trigger_processing() {
	let (_dir, processor) = common::setup_processor();
	let config = processor.config().clone();
	let final_file = common::create_candidate(&config.output_dir, "old.DO", "Test 4000\n");

	assert!(processor.handle_event(&WatchEvent::created(&final_file)).is_none());
	assert!(processor.handle_event(&WatchEvent::modified(&final_file)).is_none());
	assert!(final_file.exists());
	assert!(!processor.processed().contains(&final_file));
}

#[tokio::test]
async fn test_destination_marked_processed_after_move() {
	let (_dir, processor) = common::setup_processor();
	let config = processor.config().clone();
	let path = common::create_candidate(&config.watched_root, "mark.DO", "none\n");

	let dest = processor.process_event(&WatchEvent::created(&path)).await.unwrap().unwrap();

	assert!(processor.processed().contains(&path));
	assert!(processor.processed().contains(&dest));
}

#[tokio::test]
async fn test_existing_destination_is_an_error_and_others_continue() {
	let (_dir, processor) = common::setup_processor();
	let config = processor.config().clone();
	common::create_candidate(&config.output_dir, "clashПКС.DO", "earlier run\n");
	let clash = common::create_candidate(&config.watched_root, "clash.DO", "no keyword\n");
	let other = common::create_candidate(&config.watched_root, "other.DO", "no keyword\n");

	let clash_run = processor.handle_event(&WatchEvent::created(&clash)).unwrap();
	let other_run = processor.handle_event(&WatchEvent::created(&other)).unwrap();

	match clash_run.await.unwrap() {
		Err(SorterError::DestinationExists { path }) => assert!(path.ends_with("clashПКС.DO")),
		other => panic!("Expected DestinationExists, got {other:?}"),
	}
	// Left in its intermediate state, the earlier file untouched
	assert!(config.watched_root.join("clash.txt").exists());
	assert_eq!(
		std::fs::read_to_string(config.output_dir.join("clashПКС.DO")).unwrap(),
		"earlier run\n"
	);

	let other_dest = other_run.await.unwrap().unwrap();
	assert!(other_dest.exists());
}

#[tokio::test]
async fn test_settle_delay_does_not_block_other_files() {
	let dir = common::setup_temp_dir();
	let mut config = common::fast_config(dir.path());
	config.settle_delay = Duration::from_millis(200);
	let processor = oscillogram_sorter::FileProcessor::new(config.clone());

	let a = common::create_candidate(&config.watched_root, "a.DO", "4000\n");
	let b = common::create_candidate(&config.watched_root, "b.DO", "none\n");

	let start = std::time::Instant::now();
	let run_a = processor.handle_event(&WatchEvent::created(&a)).unwrap();
	let run_b = processor.handle_event(&WatchEvent::created(&b)).unwrap();
	// Both admitted without waiting on either settle delay
	assert!(start.elapsed() < Duration::from_millis(200));

	run_a.await.unwrap().unwrap();
	run_b.await.unwrap().unwrap();
	assert_eq!(
		common::file_names(&config.output_dir),
		vec!["aЭлИзнос.DO", "bПКС.DO"]
	);
}
